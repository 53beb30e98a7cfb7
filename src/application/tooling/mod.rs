//! # Tooling
//!
//! Local functions the model can call: the [`ToolRegistry`] holds their
//! declarations and handlers, the [`ToolExecutor`] runs them and turns any
//! failure into an error payload for the model.

mod clock;
mod error;
mod executor;
mod registry;
mod weather;

pub use clock::{CLOCK_FORMAT, CLOCK_TOOL_NAME, ClockTool};
pub use error::ToolError;
pub use executor::ToolExecutor;
pub use registry::{Tool, ToolRegistry};
pub use weather::{WEATHER_TOOL_NAME, WeatherTool};
