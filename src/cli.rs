use clap::{ArgAction, Parser};
use std::path::PathBuf;

/*
 * Command-line arguments shared by the three checker binaries. Every flag is
 * optional: run without arguments, a binary checks the default rules root with
 * the built-in thresholds.
 */
#[derive(Parser, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Rules root to scan (default: .cursor/rules)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Path to a JSON config file (default: rule-checker.json next to the rules root)
    #[arg(long, short, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_is_valid() {
        let args = CheckArgs::try_parse_from(["check-rules"]).unwrap();
        assert!(args.root.is_none());
        assert!(args.config.is_none());
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_all_arguments() {
        let args = CheckArgs::try_parse_from([
            "lint-rules",
            "--root",
            "docs/rules",
            "-c",
            "cfg.json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.root, Some(PathBuf::from("docs/rules")));
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(CheckArgs::try_parse_from(["measure-tokens", "-q", "-v"]).is_err());
    }
}
