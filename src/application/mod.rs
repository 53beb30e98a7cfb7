pub mod conversation;
pub mod tooling;
