//! Model infrastructure module
//!
//! # Structure
//! - `types` - Request, Turn, Error types
//! - `traits` - ModelClient trait
//! - `clients` - Gemini client over the REST API

pub mod clients;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use clients::GeminiClient;
pub use traits::ModelClient;
pub use types::{ModelError, ModelRequest, ModelTurn};
