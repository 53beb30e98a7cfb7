//! Model client implementations

pub mod base;
pub mod gemini;

pub use gemini::GeminiClient;
