//! Marketing site deployment workflow
//!
//! Steps run strictly in order and stop at the first fatal failure:
//! content validation, production guard, credentials, required files,
//! HTML basics, sync (or dry-run preview), content types, invalidation,
//! summary. Content-type and invalidation failures only warn.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::site_checks::{self, Finding};
use super::staging::{self, ExcludeSet};
use crate::cli::Environment;
use crate::config::SiteConfig;
use crate::error::DeployError;
use crate::infrastructure::{AwsCli, CommandRunner, SyncMode};
use crate::observability::DeployTracker;
use crate::tools::{resolve_tool, tools};
use crate::ui;

/// Flags controlling one deployment run
#[derive(Debug, Clone)]
pub struct DeployOptions {
    pub environment: Environment,
    pub region: String,
    pub profile: String,
    pub force: bool,
    pub validate: bool,
    pub dry_run: bool,
    pub site_dir: PathBuf,
    /// Explicit `--config` file, excluded from the sync when it sits in the site
    pub config_file: Option<PathBuf>,
}

/// What a successful run did
#[derive(Debug, Clone, Default)]
pub struct DeployReport {
    pub dry_run: bool,
    pub warnings: Vec<String>,
    pub publishable_files: usize,
    pub website_url: String,
}

/// Runs the deployment workflow against a [`CommandRunner`]
pub struct Deployer<R> {
    runner: R,
    aws: AwsCli,
    config: SiteConfig,
    options: DeployOptions,
    resolve_aws: bool,
}

impl<R: CommandRunner> Deployer<R> {
    /// Deployer that locates the `aws` binary before the first AWS call
    pub fn new(runner: R, config: SiteConfig, options: DeployOptions) -> Self {
        let aws = AwsCli::new(options.profile.clone());
        Self {
            runner,
            aws,
            config,
            options,
            resolve_aws: true,
        }
    }

    /// Deployer using an explicit AWS client as-is
    pub fn with_aws(runner: R, aws: AwsCli, config: SiteConfig, options: DeployOptions) -> Self {
        Self {
            runner,
            aws,
            config,
            options,
            resolve_aws: false,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn print_banner(&self) {
        let o = &self.options;
        ui::print_header("🌊 Waves Marketing Site Deployment");
        println!("📍 Environment: {}", o.environment);
        println!("🌍 Region: {}", o.region);
        println!("⚡ Force: {}", o.force);
        println!("✅ Validate: {}", o.validate);
        println!("🧪 Dry Run: {}", o.dry_run);
        println!("👤 AWS Profile: {}", o.profile);
        ui::print_rule();
    }

    /// Run every step, returning the first fatal error
    pub async fn run(&mut self, tracker: &mut DeployTracker) -> Result<DeployReport> {
        let mut report = DeployReport {
            dry_run: self.options.dry_run,
            ..DeployReport::default()
        };

        println!("📦 Gathering marketing site artifacts...");

        if self.options.validate {
            tracker.start_step("validate");
            self.validate_content(&mut report)?;
        }

        tracker.start_step("production_guard");
        self.production_guard()?;

        tracker.start_step("credentials");
        self.check_credentials().await?;

        tracker.start_step("required_files");
        self.check_required_files()?;

        tracker.start_step("html_check");
        self.check_html(&mut report);

        tracker.start_step("staging");
        report.publishable_files = self.preview_publishable(&mut report);

        if self.options.dry_run {
            tracker.start_step("dry_run");
            self.dry_run_sync().await?;
            println!();
            println!("🧪 Dry run complete - no actual deployment performed");
            ui::print_success("All validations passed - ready for deployment");
            report.website_url = self.config.website_url(&self.options.region);
            return Ok(report);
        }

        tracker.start_step("sync");
        self.sync().await?;

        tracker.start_step("content_types");
        self.set_content_types(&mut report).await;

        if let Some(distribution_id) = self.config.distribution().map(str::to_string) {
            tracker.start_step("invalidation");
            self.invalidate(&distribution_id, &mut report).await;
        }

        tracker.start_step("summary");
        report.website_url = self.config.website_url(&self.options.region);
        self.print_summary(tracker.elapsed());

        Ok(report)
    }

    fn validate_content(&self, report: &mut DeployReport) -> Result<()> {
        ui::print_step("✅ Running pre-deployment validation...");
        println!("🔒 Running marketing site validation...");

        let site_dir = &self.options.site_dir;
        let mut findings = site_checks::check_content_markers(site_dir, &self.config.content_markers)
            .inspect_err(|e| ui::print_error(&e.to_string()))?;

        let index = site_dir.join("index.html");
        if index.exists() {
            let bytes = std::fs::read(&index)
                .with_context(|| format!("Failed to read {}", index.display()))?;
            findings.extend(site_checks::check_seo(&String::from_utf8_lossy(&bytes))?);
        }

        for finding in &findings {
            record_finding(finding, report);
        }

        ui::print_success("Marketing site validation completed");
        Ok(())
    }

    fn production_guard(&self) -> Result<()> {
        if self.options.environment.is_production() && !self.options.force {
            println!();
            ui::print_warning("Production deployment requires --force flag");
            println!("   Use: waves-deploy --env=production --force");
            return Err(DeployError::ProductionRequiresForce.into());
        }
        Ok(())
    }

    async fn check_credentials(&mut self) -> Result<()> {
        ui::print_step("🔐 Checking AWS credentials...");

        if self.resolve_aws {
            let path = resolve_tool(tools::AWS).inspect_err(|e| ui::print_error(&e.to_string()))?;
            debug!("Using aws at {}", path.display());
            self.aws = AwsCli::with_program(path.display().to_string(), self.options.profile.clone());
            self.resolve_aws = false;
        }

        let output = self.runner.run(&self.aws.caller_identity()).await?;
        if !output.success {
            debug!("sts get-caller-identity: {}", output.failure_message());
            let err = DeployError::Credentials {
                profile: self.aws.profile().to_string(),
            };
            ui::print_error(&err.to_string());
            return Err(err.into());
        }

        ui::print_success("AWS credentials validated");
        Ok(())
    }

    fn check_required_files(&self) -> Result<()> {
        ui::print_step("📋 Pre-deployment checks...");

        for file in &self.config.required_files {
            if !self.options.site_dir.join(file).exists() {
                let err = DeployError::MissingFile { path: file.clone() };
                ui::print_error(&err.to_string());
                return Err(err.into());
            }
        }

        ui::print_success("Required files present");
        Ok(())
    }

    fn check_html(&self, report: &mut DeployReport) {
        let index = self.options.site_dir.join("index.html");
        if !index.exists() {
            return;
        }

        println!("🔍 Validating HTML...");
        match std::fs::read(&index) {
            Ok(bytes) => {
                for finding in site_checks::check_html_basics(&String::from_utf8_lossy(&bytes)) {
                    record_finding(&finding, report);
                }
                ui::print_success("HTML validation completed");
            }
            Err(e) => {
                debug!("Failed to read {}: {}", index.display(), e);
                let message = "HTML validation warnings (continuing anyway)".to_string();
                ui::print_warning(&message);
                report.warnings.push(message);
            }
        }
    }

    /// Count the files the sync would publish; a failed walk only warns
    fn preview_publishable(&self, report: &mut DeployReport) -> usize {
        let files = ExcludeSet::new(&self.sync_excludes())
            .and_then(|excludes| staging::publishable_files(&self.options.site_dir, &excludes));
        match files {
            Ok(files) => {
                info!("📦 {} files staged for {}", files.len(), self.config.bucket_uri());
                files.len()
            }
            Err(e) => {
                let warning = format!("Staging preview unavailable (continuing): {:#}", e);
                warn!("{}", warning);
                ui::print_warning(&warning);
                report.warnings.push(warning);
                0
            }
        }
    }

    /// Configured excludes plus an explicit config file living in the site
    fn sync_excludes(&self) -> Vec<String> {
        let mut excludes = self.config.effective_excludes();
        let config_in_site = self
            .options
            .config_file
            .as_deref()
            .and_then(|path| staging::path_within(&self.options.site_dir, path));
        if let Some(relative) = config_in_site {
            let pattern = glob::Pattern::escape(&relative);
            if !excludes.contains(&pattern) {
                excludes.push(pattern);
            }
        }
        excludes
    }

    async fn dry_run_sync(&self) -> Result<()> {
        ui::print_step("🧪 Performing dry run deployment...");

        let command = self.aws.sync(
            &self.options.site_dir,
            &self.config.bucket,
            SyncMode::Preview,
            &self.sync_excludes(),
        );
        println!("📤 Would execute: {}", command.display());

        let output = self.runner.run(&command).await?;
        if !output.success {
            let err = DeployError::DryRunFailed {
                message: output.failure_message(),
            };
            ui::print_error(&err.to_string());
            return Err(err.into());
        }
        Ok(())
    }

    async fn sync(&self) -> Result<()> {
        ui::print_step("🚀 Deploying marketing site to S3...");
        println!("📤 Syncing files to {}", self.config.bucket_uri());

        let command = self.aws.sync(
            &self.options.site_dir,
            &self.config.bucket,
            SyncMode::Mirror,
            &self.sync_excludes(),
        );

        let output = self.runner.run(&command).await?;
        if !output.success {
            let err = DeployError::SyncFailed {
                message: output.failure_message(),
            };
            ui::print_error(&err.to_string());
            return Err(err.into());
        }

        ui::print_success("Files synced to S3");
        Ok(())
    }

    async fn set_content_types(&self, report: &mut DeployReport) {
        println!("🔧 Setting content types...");

        for rule in &self.config.content_types {
            let command = self.aws.set_content_type(&self.config.bucket, rule);
            let failure = match self.runner.run(&command).await {
                Ok(output) if output.success => None,
                Ok(output) => Some(output.failure_message()),
                Err(e) => Some(e.to_string()),
            };

            if let Some(message) = failure {
                let warning = format!("Content type setting warning ({}): {}", rule.key, message);
                warn!("{}", warning);
                ui::print_warning(&warning);
                report.warnings.push(warning);
            }
        }

        ui::print_success("Content types configured");
    }

    async fn invalidate(&self, distribution_id: &str, report: &mut DeployReport) {
        ui::print_step("🔄 Creating CloudFront invalidation...");

        let command = self.aws.create_invalidation(distribution_id);
        let failure = match self.runner.run(&command).await {
            Ok(output) if output.success => None,
            Ok(output) => Some(output.failure_message()),
            Err(e) => Some(e.to_string()),
        };

        match failure {
            None => ui::print_success("CloudFront invalidation created"),
            Some(message) => {
                let warning = format!("CloudFront invalidation failed (continuing): {}", message);
                warn!("{}", warning);
                ui::print_warning(&warning);
                report.warnings.push(warning);
            }
        }
    }

    fn print_summary(&self, elapsed: Duration) {
        let website_url = self.config.website_url(&self.options.region);
        let elapsed = Duration::from_millis(elapsed.as_millis() as u64);

        println!();
        println!("{}", "🎉 Marketing site deployment completed successfully!".bright_green().bold());
        println!("📊 Deployment Summary:");
        ui::print_field("Environment", self.options.environment.as_str());
        ui::print_field("S3 Bucket", &self.config.bucket_uri());
        ui::print_field("Website URL", &website_url);
        ui::print_field("Duration", &humantime::format_duration(elapsed).to_string());

        if self.options.environment.is_production() {
            println!();
            println!("🌐 Production URLs:");
            ui::print_field(
                "Main URL",
                &format!("{} (requires DNS setup)", self.config.production_url),
            );
            ui::print_field("Direct URL", &website_url);
        }

        println!();
        println!("✨ Waves marketing site deployment complete!");
    }
}

fn record_finding(finding: &Finding, report: &mut DeployReport) {
    match finding {
        Finding::Passed(message) => ui::print_check(message),
        Finding::Warning(message) => {
            ui::print_warning(message);
            report.warnings.push(message.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BASELINE_EXCLUDES;
    use crate::error::ToolError;
    use crate::infrastructure::{CommandOutput, ToolCommand};
    use crate::observability::EventMetadata;
    use std::fs;
    use std::path::Path;
    use std::sync::Mutex;

    /// Records every command and fails those whose rendering contains a
    /// configured fragment
    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<ToolCommand>>,
        fail_on: Vec<&'static str>,
    }

    impl RecordingRunner {
        fn failing_on(fragments: &[&'static str]) -> Self {
            Self {
                fail_on: fragments.to_vec(),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<ToolCommand> {
            self.calls.lock().unwrap().clone()
        }

        fn ran(&self, fragment: &str) -> bool {
            self.calls().iter().any(|c| c.display().contains(fragment))
        }
    }

    impl CommandRunner for RecordingRunner {
        async fn run(&self, command: &ToolCommand) -> Result<CommandOutput, ToolError> {
            self.calls.lock().unwrap().push(command.clone());
            let rendered = command.display();
            if self.fail_on.iter().any(|f| rendered.contains(f)) {
                Ok(CommandOutput::failed(1, "An error occurred (AccessDenied)"))
            } else {
                Ok(CommandOutput::ok())
            }
        }
    }

    fn write_site(root: &Path) {
        let files = [
            (
                "index.html",
                "<!DOCTYPE html><title>Waves</title>Flowbite Amplify Your Navigation Tools",
            ),
            ("about.html", "<!DOCTYPE html>"),
            ("features.html", "<!DOCTYPE html>"),
            ("css/marine-theme.css", ".marine-wave {}"),
            ("js/marine-app.js", "class WavesMarineApp {}"),
        ];
        for (rel, content) in files {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
    }

    fn options(site_dir: &Path, environment: Environment) -> DeployOptions {
        DeployOptions {
            environment,
            region: "us-east-1".to_string(),
            profile: "default".to_string(),
            force: false,
            validate: false,
            dry_run: false,
            site_dir: site_dir.to_path_buf(),
            config_file: None,
        }
    }

    fn tracker() -> DeployTracker {
        DeployTracker::new(EventMetadata::new("dev", "bucket", "us-east-1", "default"), false)
    }

    fn deployer(
        runner: RecordingRunner,
        config: SiteConfig,
        options: DeployOptions,
    ) -> Deployer<RecordingRunner> {
        Deployer::with_aws(runner, AwsCli::with_program("aws", "default"), config, options)
    }

    #[tokio::test]
    async fn test_dry_run_previews_without_real_sync() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());
        let mut opts = options(dir.path(), Environment::Staging);
        opts.dry_run = true;

        let mut deployer = deployer(RecordingRunner::default(), SiteConfig::default(), opts);
        let report = deployer.run(&mut tracker()).await.unwrap();

        assert!(report.dry_run);
        let runner = deployer.runner();
        assert!(runner.ran("sts get-caller-identity"));
        assert!(runner.ran("s3 sync"));
        let syncs: Vec<_> = runner
            .calls()
            .into_iter()
            .filter(|c| c.display().contains("s3 sync"))
            .collect();
        assert_eq!(syncs.len(), 1);
        assert!(syncs[0].has_arg("--dryrun"));
        assert!(!syncs[0].has_arg("--delete"));
        assert!(!runner.ran("s3 cp"));
    }

    #[tokio::test]
    async fn test_production_without_force_runs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());

        let mut deployer = deployer(
            RecordingRunner::default(),
            SiteConfig::default(),
            options(dir.path(), Environment::Production),
        );
        let err = deployer.run(&mut tracker()).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DeployError>(),
            Some(DeployError::ProductionRequiresForce)
        ));
        assert!(deployer.runner().calls().is_empty());
    }

    #[tokio::test]
    async fn test_production_with_force_deploys() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());
        let mut opts = options(dir.path(), Environment::Production);
        opts.force = true;

        let mut deployer = deployer(RecordingRunner::default(), SiteConfig::default(), opts);
        deployer.run(&mut tracker()).await.unwrap();
        assert!(deployer.runner().ran("--delete"));
    }

    #[tokio::test]
    async fn test_missing_required_file_stops_before_sync() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());
        fs::remove_file(dir.path().join("about.html")).unwrap();

        let mut deployer = deployer(
            RecordingRunner::default(),
            SiteConfig::default(),
            options(dir.path(), Environment::Dev),
        );
        let err = deployer.run(&mut tracker()).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DeployError>(),
            Some(DeployError::MissingFile { path }) if path == "about.html"
        ));
        assert!(!deployer.runner().ran("s3 sync"));
    }

    #[tokio::test]
    async fn test_bad_credentials_are_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());

        let mut deployer = deployer(
            RecordingRunner::failing_on(&["get-caller-identity"]),
            SiteConfig::default(),
            options(dir.path(), Environment::Dev),
        );
        let err = deployer.run(&mut tracker()).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DeployError>(),
            Some(DeployError::Credentials { .. })
        ));
        assert_eq!(deployer.runner().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_sync_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());

        let mut deployer = deployer(
            RecordingRunner::failing_on(&["s3 sync"]),
            SiteConfig::default(),
            options(dir.path(), Environment::Dev),
        );
        let err = deployer.run(&mut tracker()).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DeployError>(),
            Some(DeployError::SyncFailed { .. })
        ));
        assert!(!deployer.runner().ran("s3 cp"));
    }

    #[tokio::test]
    async fn test_content_type_failure_only_warns() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());

        let mut deployer = deployer(
            RecordingRunner::failing_on(&["marine-theme.css"]),
            SiteConfig::default(),
            options(dir.path(), Environment::Dev),
        );
        let report = deployer.run(&mut tracker()).await.unwrap();

        let copies = deployer
            .runner()
            .calls()
            .into_iter()
            .filter(|c| c.display().contains("s3 cp"))
            .count();
        assert_eq!(copies, 3);
        assert!(report.warnings.iter().any(|w| w.contains("css/marine-theme.css")));
    }

    #[tokio::test]
    async fn test_invalidation_only_with_distribution() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());

        let mut without = deployer(
            RecordingRunner::default(),
            SiteConfig::default(),
            options(dir.path(), Environment::Dev),
        );
        without.run(&mut tracker()).await.unwrap();
        assert!(!without.runner().ran("cloudfront"));

        let config = SiteConfig {
            distribution_id: Some("E2EXAMPLE".to_string()),
            ..SiteConfig::default()
        };
        let mut with = deployer(
            RecordingRunner::failing_on(&["cloudfront"]),
            config,
            options(dir.path(), Environment::Dev),
        );
        let report = with.run(&mut tracker()).await.unwrap();
        assert!(with.runner().ran("--distribution-id E2EXAMPLE"));
        assert!(report.warnings.iter().any(|w| w.contains("CloudFront")));
    }

    #[tokio::test]
    async fn test_sync_always_carries_baseline_excludes() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());
        let config = SiteConfig {
            exclude_patterns: vec!["drafts/*".to_string()],
            ..SiteConfig::default()
        };

        for environment in [Environment::Dev, Environment::Staging] {
            let mut deployer = deployer(
                RecordingRunner::default(),
                config.clone(),
                options(dir.path(), environment),
            );
            deployer.run(&mut tracker()).await.unwrap();

            let sync = deployer
                .runner()
                .calls()
                .into_iter()
                .find(|c| c.display().contains("s3 sync"))
                .unwrap();
            let excludes: Vec<&str> = sync
                .args
                .windows(2)
                .filter(|w| w[0] == "--exclude")
                .map(|w| w[1].as_str())
                .collect();
            for pattern in BASELINE_EXCLUDES {
                assert!(excludes.contains(pattern), "missing {}", pattern);
            }
            assert!(excludes.contains(&"drafts/*"));
        }
    }

    fn sync_excludes(runner: &RecordingRunner) -> Vec<String> {
        let sync = runner
            .calls()
            .into_iter()
            .find(|c| c.display().contains("s3 sync"))
            .unwrap();
        sync.args
            .windows(2)
            .filter(|w| w[0] == "--exclude")
            .map(|w| w[1].clone())
            .collect()
    }

    #[tokio::test]
    async fn test_site_config_file_is_never_published() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());
        fs::write(dir.path().join("deploy.yaml"), "distribution_id: E2SECRET\n").unwrap();
        fs::write(dir.path().join("waves-prod.yaml"), "bucket: waves-prod\n").unwrap();

        let mut default_file = deployer(
            RecordingRunner::default(),
            SiteConfig::default(),
            options(dir.path(), Environment::Dev),
        );
        let report = default_file.run(&mut tracker()).await.unwrap();
        assert!(sync_excludes(default_file.runner()).contains(&"deploy*.yaml".to_string()));
        assert_eq!(report.publishable_files, 6);

        let mut opts = options(dir.path(), Environment::Dev);
        opts.config_file = Some(dir.path().join("waves-prod.yaml"));
        let mut explicit = deployer(RecordingRunner::default(), SiteConfig::default(), opts);
        let report = explicit.run(&mut tracker()).await.unwrap();
        assert!(sync_excludes(explicit.runner()).contains(&"waves-prod.yaml".to_string()));
        assert_eq!(report.publishable_files, 5);
    }

    #[tokio::test]
    async fn test_outside_config_file_adds_no_exclude() {
        let dir = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        write_site(dir.path());
        let config_file = elsewhere.path().join("deploy.yaml");
        fs::write(&config_file, "bucket: waves-prod\n").unwrap();

        let mut opts = options(dir.path(), Environment::Dev);
        opts.config_file = Some(config_file);
        let mut deployer = deployer(RecordingRunner::default(), SiteConfig::default(), opts);
        deployer.run(&mut tracker()).await.unwrap();
        assert_eq!(
            sync_excludes(deployer.runner()),
            SiteConfig::default().effective_excludes()
        );
    }

    #[tokio::test]
    async fn test_validate_tolerates_non_utf8_pages() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());
        let mut page = b"<!DOCTYPE html><title>Waves \xE9t\xE9</title>".to_vec();
        page.extend_from_slice(b"Flowbite Amplify Your Navigation Tools");
        fs::write(dir.path().join("index.html"), page).unwrap();
        let mut opts = options(dir.path(), Environment::Dev);
        opts.validate = true;

        let mut deployer = deployer(RecordingRunner::default(), SiteConfig::default(), opts);
        let report = deployer.run(&mut tracker()).await.unwrap();
        assert!(deployer.runner().ran("s3 sync"));
        assert!(!report.warnings.iter().any(|w| w.contains("Page title")));
        assert!(report.warnings.iter().any(|w| w.contains("Meta description")));
    }

    #[test]
    fn test_staging_preview_failure_only_warns() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not-built-yet");

        let deployer = deployer(
            RecordingRunner::default(),
            SiteConfig::default(),
            options(&missing, Environment::Dev),
        );
        let mut report = DeployReport::default();
        assert_eq!(deployer.preview_publishable(&mut report), 0);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("Staging preview unavailable"));
    }

    #[tokio::test]
    async fn test_validate_missing_marker_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());
        fs::remove_file(dir.path().join("js/marine-app.js")).unwrap();
        let mut opts = options(dir.path(), Environment::Dev);
        opts.validate = true;

        let mut deployer = deployer(RecordingRunner::default(), SiteConfig::default(), opts);
        assert!(deployer.run(&mut tracker()).await.is_err());
        assert!(deployer.runner().calls().is_empty());
    }

    #[tokio::test]
    async fn test_validate_reports_missing_markers_as_warnings() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());
        let mut opts = options(dir.path(), Environment::Dev);
        opts.validate = true;

        let mut deployer = deployer(RecordingRunner::default(), SiteConfig::default(), opts);
        let report = deployer.run(&mut tracker()).await.unwrap();
        assert!(report.warnings.iter().any(|w| w.contains("Pricing section")));
        assert!(report.warnings.iter().any(|w| w.contains("Meta description")));
    }

    #[test]
    fn test_report_counts_publishable_files() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());
        fs::write(dir.path().join("NOTES.md"), "draft").unwrap();

        let mut deployer = deployer(
            RecordingRunner::default(),
            SiteConfig::default(),
            options(dir.path(), Environment::Dev),
        );
        let report = tokio_test::block_on(deployer.run(&mut tracker())).unwrap();
        assert_eq!(report.publishable_files, 5);
        assert_eq!(
            report.website_url,
            "http://waves-static-seawater.s3-website-us-east-1.amazonaws.com"
        );
    }
}
