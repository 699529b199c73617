//! Infrastructure layer - external I/O adapters
//!
//! This module contains all code that interacts with external systems:
//! - AWS CLI (STS, S3, CloudFront)
//! - Child process execution

pub mod aws;
pub mod runner;

// Re-export commonly used types
pub use aws::{AwsCli, SyncMode};
pub use runner::{CommandOutput, CommandRunner, StdioMode, SystemRunner, ToolCommand};
