use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/*
 * This module provides the file discovery half of every rule check: a recursive
 * walk of the rules root that yields regular files only, plus the suffix filter
 * that narrows the walk down to rule files. It defines the errors for these
 * operations, a trait `RuleFileWalkerOperations` abstracting the traversal, and
 * the concrete `CoreRuleFileWalker`.
 */

/*
 * Errors raised while discovering or reading rule files. All of them are fatal
 * for a check run: the caller aborts instead of counting them per file.
 */
#[derive(Debug, thiserror::Error)]
pub enum FileSystemError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid path: {0:?} is not a readable directory")]
    InvalidPath(PathBuf),
}

pub type Result<T> = std::result::Result<T, FileSystemError>;

/*
 * Defines the traversal used by the checkers.
 * Implementations must return every regular file below `root` exactly once and
 * never return directories. Ordering is implementation defined.
 */
pub trait RuleFileWalkerOperations: Send + Sync {
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/*
 * The `walkdir` based walker. Symbolic links are never followed, and symlinked
 * entries are skipped altogether, so a link pointing back up the tree cannot
 * cause an endless descent. Entries are sorted by file name within each
 * directory to keep diagnostics stable between runs.
 */
pub struct CoreRuleFileWalker {}

impl CoreRuleFileWalker {
    pub fn new() -> Self {
        CoreRuleFileWalker {}
    }
}

impl Default for CoreRuleFileWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleFileWalkerOperations for CoreRuleFileWalker {
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(FileSystemError::InvalidPath(root.to_path_buf()));
        }
        log::debug!("RuleFileWalker: Walking {root:?}");

        let mut files = Vec::new();
        let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
        for entry_result in walker {
            let entry = entry_result?;
            let file_type = entry.file_type();
            if file_type.is_symlink() {
                log::trace!("RuleFileWalker: Not following symlink {:?}", entry.path());
                continue;
            }
            if file_type.is_file() {
                files.push(entry.into_path());
            }
        }

        log::debug!(
            "RuleFileWalker: Found {} files under {:?}",
            files.len(),
            root
        );
        Ok(files)
    }
}

/*
 * Keeps the paths whose file name ends in `.<extension>`. The match is an exact,
 * case-sensitive suffix comparison on the final path component, and the name
 * needs a non-empty stem: a dotfile named just `.<extension>` has no extension.
 */
pub fn filter_by_extension(paths: Vec<PathBuf>, extension: &str) -> Vec<PathBuf> {
    let suffix = format!(".{extension}");
    paths
        .into_iter()
        .filter(|p| {
            p.file_name().is_some_and(|name| {
                let name = name.to_string_lossy();
                name.len() > suffix.len() && name.ends_with(&suffix)
            })
        })
        .collect()
}

pub fn collect_rule_files(
    walker: &dyn RuleFileWalkerOperations,
    root: &Path,
    extension: &str,
) -> Result<Vec<PathBuf>> {
    let all_files = walker.walk_files(root)?;
    let total = all_files.len();
    let rule_files = filter_by_extension(all_files, extension);
    log::debug!(
        "RuleFileWalker: {} of {} files match '.{}'",
        rule_files.len(),
        total,
        extension
    );
    Ok(rule_files)
}
