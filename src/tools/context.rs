use std::path::{Component, Path, PathBuf};
use std::time::Duration;

/// Wall-clock budget for `execute_command`.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// File extensions `search_files` looks inside.
pub const DEFAULT_SEARCH_EXTENSIONS: &[&str] = &["py", "txt", "md", "json", "yaml", "yml"];

/// Environment the tools run in.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Relative paths given by the model are resolved against this.
    pub working_dir: PathBuf,
    pub command_timeout: Duration,
    pub search_extensions: Vec<String>,
}

impl ToolContext {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            search_extensions: DEFAULT_SEARCH_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub fn with_search_extensions(mut self, extensions: Vec<String>) -> Self {
        self.search_extensions = extensions;
        self
    }

    /// Resolve `path` against the working directory, dropping `.` segments.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        let base = if path.is_absolute() {
            PathBuf::new()
        } else {
            self.working_dir.clone()
        };
        path.components()
            .filter(|component| !matches!(component, Component::CurDir))
            .fold(base, |mut resolved, component| {
                resolved.push(component);
                resolved
            })
    }

    pub(crate) fn is_searchable(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.search_extensions
                    .iter()
                    .any(|allowed| allowed == ext)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_resolve_against_working_dir() {
        let ctx = ToolContext::new("/work");
        assert_eq!(ctx.resolve("src/main.rs"), PathBuf::from("/work/src/main.rs"));
        assert_eq!(ctx.resolve("/etc/hosts"), PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn current_dir_segments_are_dropped() {
        let ctx = ToolContext::new("/work");
        assert_eq!(ctx.resolve("."), PathBuf::from("/work"));
        assert_eq!(ctx.resolve("./src/./lib.rs"), PathBuf::from("/work/src/lib.rs"));
        assert_eq!(ctx.resolve("../up"), PathBuf::from("/work/../up"));
    }

    #[test]
    fn extension_check_uses_exact_allow_list() {
        let ctx = ToolContext::new(".");
        assert!(ctx.is_searchable(Path::new("notes.md")));
        assert!(ctx.is_searchable(Path::new("config.yml")));
        assert!(!ctx.is_searchable(Path::new("README.MD")));
        assert!(!ctx.is_searchable(Path::new("main.rs")));
        assert!(!ctx.is_searchable(Path::new("Makefile")));

        let widened = ctx.with_search_extensions(vec!["rs".to_string()]);
        assert!(widened.is_searchable(Path::new("main.rs")));
    }
}
