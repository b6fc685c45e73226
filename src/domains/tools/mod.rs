//! Tools domain module.
//!
//! Everything needed to turn an MCP tool call into an EventLite API call and
//! back into text.
//!
//! ## Architecture
//!
//! - `definitions/` - one file per tool (params, validation, execute)
//! - `handlers.rs` - the [`ToolHandler`] trait shared by all tools
//! - `validation.rs` - field checks collected into [`ValidationErrors`]
//! - `format.rs` - rendering of API results into display text
//! - `image.rs` - cover image compression before upload
//! - `registry.rs` - tool catalog and dispatch
//! - `error.rs` - tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a file in `definitions/` with a params struct implementing
//!    `Deserialize`, `JsonSchema` and `Validate`
//! 2. Implement [`ToolHandler`] for a unit struct
//! 3. Add it to `tool_names()`, `get_all_tools()` and `dispatch()` in `registry.rs`

pub mod definitions;
mod error;
pub mod format;
mod handlers;
pub mod image;
mod registry;
pub mod validation;

pub use error::ToolError;
pub use handlers::{ToolHandler, parse_arguments};
pub use registry::ToolRegistry;
pub use validation::{Validate, ValidationError, ValidationErrors};
