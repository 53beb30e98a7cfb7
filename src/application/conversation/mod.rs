//! # Conversation Module
//!
//! Runs one chat turn against the model, executing the tools it asks for.
//!
//! ## Loop
//!
//! 1. Append the user message and send the session to the model
//! 2. Final text: append it and return
//! 3. Tool call: run the first requested tool, append the call and its
//!    result, send the session again
//! 4. Neither: append fallback text and return
//!
//! The number of tool round trips per turn is capped by
//! [`LoopSettings::max_tool_steps`].

mod errors;
mod models;
mod runner;

#[cfg(test)]
mod tests;

pub use errors::{ChatError, ErrorKind};
pub use models::{ConversationOutcome, LoopSettings};
pub use runner::ConversationLoop;
