/*
 * Glue between the command line and the core checks. `RuleCheckApp` owns the
 * walker and token counter behind their traits, runs one `Tool` against a
 * resolved `CheckerConfig` and writes the report. `run_cli` is the entry point
 * used by the binaries and maps the outcome to a process exit code.
 */
use std::io::{self, Write};
use std::process::ExitCode;

use crate::cli::CheckArgs;
use crate::core::{
    CheckerConfig, ConfigError, CoreRuleFileWalker, CoreTikTokenCounter, FileSystemError,
    RuleFileWalkerOperations, SimpleWhitespaceTokenCounter, TokenCounterOperations,
    check_line_counts, check_sizes, collect_rule_files, estimate_tokens, resolve_config,
};
use crate::logging;
use crate::report;

pub const EXIT_OK: u8 = 0;
pub const EXIT_THRESHOLD_ERROR: u8 = 1;
pub const EXIT_FATAL: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    SizeCheck,
    LineCheck,
    TokenEstimate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Passed => EXIT_OK,
            Outcome::Failed => EXIT_THRESHOLD_ERROR,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    FileSystem(#[from] FileSystemError),
    #[error("Failed to write report: {0}")]
    Output(#[from] io::Error),
}

pub struct RuleCheckApp {
    walker: Box<dyn RuleFileWalkerOperations>,
    token_counter: Box<dyn TokenCounterOperations>,
}

impl RuleCheckApp {
    pub fn new(
        walker: Box<dyn RuleFileWalkerOperations>,
        token_counter: Box<dyn TokenCounterOperations>,
    ) -> Self {
        RuleCheckApp {
            walker,
            token_counter,
        }
    }

    /*
     * Runs one check to completion. Threshold violations are reported through
     * `Outcome::Failed`; filesystem and output failures abort the run as errors.
     */
    pub fn run(
        &self,
        tool: Tool,
        config: &CheckerConfig,
        out: &mut impl Write,
        diag: &mut impl Write,
    ) -> Result<Outcome, AppError> {
        log::info!(
            "RuleCheckApp: Running {tool:?} on {:?} (*.{})",
            config.root,
            config.extension
        );
        let files = collect_rule_files(self.walker.as_ref(), &config.root, &config.extension)?;

        let outcome = match tool {
            Tool::SizeCheck => {
                let result = check_sizes(&files, &config.size_limits())?;
                report::write_size_report(&result, out, diag)?;
                outcome_of(result.is_failure())
            }
            Tool::LineCheck => {
                let result = check_line_counts(&files, config.max_lines)?;
                report::write_line_report(&result, out, diag)?;
                outcome_of(result.is_failure())
            }
            Tool::TokenEstimate => {
                let estimate = estimate_tokens(&files, self.token_counter.as_ref())?;
                report::write_token_report(&estimate, out)?;
                Outcome::Passed
            }
        };
        log::debug!("RuleCheckApp: {tool:?} finished with {outcome:?}");
        Ok(outcome)
    }
}

impl Default for RuleCheckApp {
    fn default() -> Self {
        Self::new(
            Box::new(CoreRuleFileWalker::new()),
            Box::new(CoreTikTokenCounter::new()),
        )
    }
}

fn outcome_of(failed: bool) -> Outcome {
    if failed {
        Outcome::Failed
    } else {
        Outcome::Passed
    }
}

pub fn run_cli(tool: Tool, args: &CheckArgs) -> ExitCode {
    logging::init_logging(logging::level_for(args.verbose, args.quiet));

    let config = match resolve_config(args.config.as_deref(), args.root.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::from(EXIT_FATAL);
        }
    };

    // The BPE encoder is only loaded when it is actually needed.
    let app = match tool {
        Tool::TokenEstimate => RuleCheckApp::default(),
        Tool::SizeCheck | Tool::LineCheck => RuleCheckApp::new(
            Box::new(CoreRuleFileWalker::new()),
            Box::new(SimpleWhitespaceTokenCounter::new()),
        ),
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    match app.run(tool, &config, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn test_app() -> RuleCheckApp {
        RuleCheckApp::new(
            Box::new(CoreRuleFileWalker::new()),
            Box::new(SimpleWhitespaceTokenCounter::new()),
        )
    }

    fn config_for(root: &Path) -> CheckerConfig {
        CheckerConfig {
            root: root.to_path_buf(),
            ..CheckerConfig::default()
        }
    }

    fn run_tool(tool: Tool, root: &Path) -> Result<(Outcome, String, String), AppError> {
        let (mut out, mut diag) = (Vec::new(), Vec::new());
        let outcome = test_app().run(tool, &config_for(root), &mut out, &mut diag)?;
        Ok((
            outcome,
            String::from_utf8_lossy(&out).into_owned(),
            String::from_utf8_lossy(&diag).into_owned(),
        ))
    }

    // A walker that returns a fixed list, to check the app only hands rule files on.
    struct FixedWalker(Vec<PathBuf>);

    impl RuleFileWalkerOperations for FixedWalker {
        fn walk_files(&self, _root: &Path) -> crate::core::file_system::Result<Vec<PathBuf>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_size_check_fails_on_oversized_rule() -> Result<(), AppError> {
        let dir = tempdir()?;
        fs::write(dir.path().join("big.mdc"), vec![b'a'; 9000])?;

        let (outcome, out, diag) = run_tool(Tool::SizeCheck, dir.path())?;

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(outcome.exit_code(), 1);
        assert!(diag.contains("[size]"), "diag: {diag}");
        assert!(out.contains("[ok] 1 rule files scanned. Total: 9000 bytes"));
        Ok(())
    }

    #[test]
    fn test_line_check_fails_on_long_rule() -> Result<(), AppError> {
        let dir = tempdir()?;
        let body: String = (0..1001).map(|i| format!("{i}\n")).collect();
        fs::write(dir.path().join("long.mdc"), body)?;

        let (outcome, out, diag) = run_tool(Tool::LineCheck, dir.path())?;

        assert_eq!(outcome, Outcome::Failed);
        assert!(diag.contains("[lines]"), "diag: {diag}");
        assert!(out.starts_with("[fail] 1 rule files checked"));
        Ok(())
    }

    #[test]
    fn test_compliant_tree_passes_all_tools() -> Result<(), AppError> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("vue"))?;
        fs::write(dir.path().join("core.mdc"), "# Core\nUse TypeScript.\n")?;
        fs::write(dir.path().join("vue/pinia.mdc"), "# Pinia\nSetup stores.\n")?;
        fs::write(dir.path().join("ignored.txt"), vec![b'x'; 20000])?;

        let (outcome, out, diag) = run_tool(Tool::SizeCheck, dir.path())?;
        assert_eq!(outcome, Outcome::Passed);
        assert!(diag.is_empty());
        assert!(out.starts_with("[ok] 2 rule files scanned."));

        let (outcome, out, _) = run_tool(Tool::LineCheck, dir.path())?;
        assert_eq!(outcome, Outcome::Passed);
        assert_eq!(out, "[ok] 2 rule files checked.\n");

        let (outcome, out, _) = run_tool(Tool::TokenEstimate, dir.path())?;
        assert_eq!(outcome, Outcome::Passed);
        assert!(out.contains("Approx total chars across rules: 45"));
        Ok(())
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let result = run_tool(Tool::SizeCheck, Path::new("no_such_rules_root_for_app"));
        assert!(matches!(result, Err(AppError::FileSystem(_))));
    }

    #[test]
    fn test_app_filters_walker_output_by_extension() -> Result<(), AppError> {
        let dir = tempdir()?;
        let rule = dir.path().join("a.mdc");
        let other = dir.path().join("b.md");
        fs::write(&rule, "rule")?;
        fs::write(&other, vec![b'x'; 10000])?;
        let app = RuleCheckApp::new(
            Box::new(FixedWalker(vec![rule, other])),
            Box::new(SimpleWhitespaceTokenCounter::new()),
        );
        let (mut out, mut diag) = (Vec::new(), Vec::new());

        let outcome = app.run(Tool::SizeCheck, &config_for(dir.path()), &mut out, &mut diag)?;

        assert_eq!(outcome, Outcome::Passed);
        assert_eq!(
            String::from_utf8_lossy(&out),
            "[ok] 1 rule files scanned. Total: 4 bytes\n"
        );
        Ok(())
    }
}
