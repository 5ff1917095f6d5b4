/*
 * The platform-agnostic logic of the rule checker: file discovery, the three
 * checks (size/encoding, line count, token estimate), their shared data model
 * and configuration. Nothing in here prints; results are returned to the
 * caller and rendered by the `report` module.
 */
pub mod config;
pub mod file_system;
pub mod line_checker;
pub mod models;
pub mod size_checker;
pub mod token_estimator;
pub mod tokenizer_utils;

// Re-export key structures and enums
pub use models::{Diagnostic, DiagnosticKind, FileRecord, ScanResult, Severity};

// Re-export file system related items
pub use file_system::{
    CoreRuleFileWalker, FileSystemError, RuleFileWalkerOperations, collect_rule_files,
    filter_by_extension,
};

// Re-export config related items
pub use config::{CheckerConfig, ConfigError, resolve_config};

pub use line_checker::{check_line_counts, count_lines};
pub use size_checker::{SizeLimits, check_sizes};
pub use token_estimator::{TokenEstimate, estimate_tokens};
pub use tokenizer_utils::{
    CoreTikTokenCounter, SimpleWhitespaceTokenCounter, TokenCounterOperations,
};
