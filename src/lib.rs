/*
 * Checks for editor rule files (`.mdc`): byte size and ASCII-only content,
 * line count, and an informational token estimate. The three checks are
 * independent and each has its own binary; this library holds the shared
 * walker, checkers, configuration and report rendering.
 */
pub mod app_logic;
pub mod cli;
pub mod core;
pub mod logging;
pub mod report;

pub use app_logic::{Outcome, RuleCheckApp, Tool, run_cli};
pub use cli::CheckArgs;
