//! Runtime tool path resolution
//!
//! For each external tool (e.g. `aws`) we:
//! 1. Check for an environment variable `{TOOL}_BIN` (e.g. `AWS_BIN`)
//! 2. Fall back to PATH-based invocation if the envvar is not set
//!
//! ```rust,ignore
//! use crate::tools::{resolve_tool, tools};
//!
//! let aws = resolve_tool(tools::AWS)?;
//! Command::new(&aws).args(["sts", "get-caller-identity"]).status().await?;
//! ```

use std::env;
use std::path::PathBuf;

use crate::error::ToolError;

/// Environment variable consulted for a tool's path (`aws` → `AWS_BIN`)
pub fn tool_env_var(tool: &str) -> String {
    format!("{}_BIN", tool.to_uppercase().replace('-', "_"))
}

/// Get the path to an external tool
///
/// Checks `{TOOL}_BIN` first and falls back to the tool name itself,
/// which relies on PATH.
pub fn get_tool_path(tool: &str) -> String {
    env::var(tool_env_var(tool)).unwrap_or_else(|_| tool.to_string())
}

/// Resolve a tool to a concrete executable, failing if it cannot be found
///
/// An explicit `{TOOL}_BIN` path is trusted as-is; otherwise the name is
/// looked up on PATH.
pub fn resolve_tool(tool: &str) -> Result<PathBuf, ToolError> {
    let env_var = tool_env_var(tool);
    if let Ok(path) = env::var(&env_var) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    which::which(tool).map_err(|_| ToolError::NotFound {
        tool: tool.to_string(),
        env_var,
    })
}

/// Common tool names
pub mod tools {
    pub const AWS: &str = "aws";
}
