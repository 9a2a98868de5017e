//! Copy configuration
//!
//! Built once by the CLI and handed to the copier; never mutated during a run.

/// Directories whose path relative to the source root starts with one of
/// these (case-insensitive) are skipped along with everything below them.
/// E.g. `Output` excludes `<root>/Output` but not `<root>/GUI/Output`.
pub const DEFAULT_EXCLUDE_PREFIXES: &[&str] = &[
    "_Resharper",
    "Intermediate",
    "Output",
    "_UpgradeReport_Files",
    "ipch",
];

/// Files ending with these suffixes (case-insensitive) get name substitution
/// but no relative path rewriting.
pub const DEFAULT_NO_PATH_REWRITE: &[&str] = &[".PNG", ".TGA", ".DAE"];

/// Configuration for a copy run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyConfig {
    /// Directory prefixes to exclude, relative to the source root
    pub exclude_prefixes: Vec<String>,

    /// File name suffixes exempt from path rewriting
    pub no_path_rewrite: Vec<String>,

    /// Rewrite relative path fragments into absolute paths
    pub fix_relative: bool,

    /// Strip `$(ProjectDir)` tokens before looking for relative paths
    pub strip_project_dir_token: bool,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            exclude_prefixes: owned_list(DEFAULT_EXCLUDE_PREFIXES),
            no_path_rewrite: owned_list(DEFAULT_NO_PATH_REWRITE),
            fix_relative: true,
            strip_project_dir_token: true,
        }
    }
}

impl CopyConfig {
    pub fn with_fix_relative(mut self, fix_relative: bool) -> Self {
        self.fix_relative = fix_relative;
        self
    }

    pub fn with_strip_project_dir_token(mut self, strip: bool) -> Self {
        self.strip_project_dir_token = strip;
        self
    }

    /// Replace the exclusion list
    pub fn with_exclude_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Append to the exclusion list
    pub fn extend_exclude_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_prefixes
            .extend(prefixes.into_iter().map(Into::into));
        self
    }

    /// Append to the no-path-rewrite suffix list
    pub fn extend_no_path_rewrite<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.no_path_rewrite
            .extend(suffixes.into_iter().map(Into::into));
        self
    }

    /// Whether a directory, given as its `/`-separated path relative to the
    /// source root, falls under an exclusion prefix.
    pub fn is_excluded_dir(&self, relative: &str) -> bool {
        let relative = relative.to_lowercase();
        self.exclude_prefixes.iter().any(|prefix| {
            let prefix = prefix.replace('\\', "/").to_lowercase();
            relative.starts_with(&prefix)
        })
    }

    /// Whether relative path rewriting applies to a file with this name.
    pub fn rewrites_paths_in(&self, file_name: &str) -> bool {
        if !self.fix_relative {
            return false;
        }
        let name = file_name.to_lowercase();
        !self
            .no_path_rewrite
            .iter()
            .any(|suffix| name.ends_with(&suffix.to_lowercase()))
    }
}

fn owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
