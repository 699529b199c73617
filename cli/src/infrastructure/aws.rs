//! AWS CLI command builders
//!
//! Commands are built here and executed by a [`super::CommandRunner`]; this
//! module never spawns anything itself.

use std::path::Path;

use super::runner::ToolCommand;
use crate::config::ContentTypeRule;
use crate::tools::{get_tool_path, tools};

/// Whether a sync only previews changes or mirrors the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// `--dryrun`: list what would change
    Preview,
    /// `--delete`: upload changes and remove remote objects absent locally
    Mirror,
}

/// Client for AWS CLI invocations bound to one named profile
#[derive(Debug, Clone)]
pub struct AwsCli {
    program: String,
    profile: String,
}

impl AwsCli {
    /// Create a client using `AWS_BIN` or `aws` from PATH
    pub fn new(profile: impl Into<String>) -> Self {
        Self::with_program(get_tool_path(tools::AWS), profile)
    }

    pub fn with_program(program: impl Into<String>, profile: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            profile: profile.into(),
        }
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    fn command(&self) -> ToolCommand {
        ToolCommand::new(&self.program)
    }

    /// `aws sts get-caller-identity`
    pub fn caller_identity(&self) -> ToolCommand {
        self.command()
            .args(["sts", "get-caller-identity", "--profile", self.profile.as_str()])
    }

    /// `aws s3 sync <dir> s3://<bucket>` with the exclude list
    pub fn sync(&self, local_dir: &Path, bucket: &str, mode: SyncMode, excludes: &[String]) -> ToolCommand {
        let mode_flag = match mode {
            SyncMode::Preview => "--dryrun",
            SyncMode::Mirror => "--delete",
        };

        let mut cmd = self
            .command()
            .args(["s3", "sync"])
            .arg(local_dir.display().to_string())
            .arg(format!("s3://{}", bucket))
            .args(["--profile", self.profile.as_str(), mode_flag]);
        for pattern in excludes {
            cmd = cmd.arg("--exclude").arg(pattern);
        }
        cmd.inherit()
    }

    /// In-place copy of one object replacing its metadata with a content type
    pub fn set_content_type(&self, bucket: &str, rule: &ContentTypeRule) -> ToolCommand {
        let object = format!("s3://{}/{}", bucket, rule.key.trim_start_matches('/'));
        self.command()
            .args(["s3", "cp"])
            .arg(&object)
            .arg(&object)
            .args(["--profile", self.profile.as_str()])
            .args(["--content-type", rule.content_type.as_str()])
            .args(["--metadata-directive", "REPLACE"])
    }

    /// `aws cloudfront create-invalidation` for every path
    pub fn create_invalidation(&self, distribution_id: &str) -> ToolCommand {
        self.command()
            .args(["cloudfront", "create-invalidation"])
            .args(["--distribution-id", distribution_id])
            .args(["--paths", "/*"])
            .args(["--profile", self.profile.as_str()])
    }
}
