//! File-based configuration for the `tabscan` binary.

pub mod tool;

pub use tool::{load_config, ToolConfig};
