//! Centralized error types for waves-deploy
//!
//! Uses thiserror for typed errors that can be matched on,
//! while still being compatible with anyhow for propagation.

use thiserror::Error;

/// Top-level error type for deployment operations
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Production deployment requires --force flag")]
    ProductionRequiresForce,

    #[error("AWS credentials not configured for profile: {profile}")]
    Credentials { profile: String },

    #[error("Required file missing: {path}")]
    MissingFile { path: String },

    #[error("S3 sync failed: {message}")]
    SyncFailed { message: String },

    #[error("Dry run failed: {message}")]
    DryRunFailed { message: String },

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// External tool errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{tool} not found. Install it or set {env_var} to its path")]
    NotFound { tool: String, env_var: String },

    #[error("Failed to spawn {command}: {message}")]
    SpawnFailed { command: String, message: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Invalid exclude pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Required configuration missing: {field}")]
    MissingField { field: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_error_display() {
        let err = DeployError::Credentials {
            profile: "waves-prod".to_string(),
        };
        assert!(err.to_string().contains("waves-prod"));
    }

    #[test]
    fn test_error_conversion() {
        let config_err = ConfigError::MissingField {
            field: "bucket".to_string(),
        };
        let deploy_err: DeployError = config_err.into();
        assert!(matches!(deploy_err, DeployError::Config(_)));
    }

    #[test]
    fn test_tool_not_found_mentions_env_var() {
        let err = ToolError::NotFound {
            tool: "aws".to_string(),
            env_var: "AWS_BIN".to_string(),
        };
        assert!(err.to_string().contains("AWS_BIN"));
    }
}
