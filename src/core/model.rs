//! Copy report model
//!
//! Every run produces a `CopyReport` which is handed to the renderer.
//! Paths inside records are relative to their root and use '/' as separator.

use serde::{Deserialize, Serialize};

/// One copied file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the source root
    pub source: String,

    /// Path relative to the target root
    pub destination: String,

    /// Bytes written to the destination
    pub bytes: u64,

    /// Whether the file name had the project name substituted
    pub renamed: bool,

    /// Number of lines whose relative path fragment was made absolute
    pub path_rewrites: usize,
}

/// Outcome of a complete copy run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CopyReport {
    pub source_root: String,
    pub target_root: String,
    pub source_name: String,
    pub target_name: String,

    /// Copied files in traversal order
    pub files: Vec<FileRecord>,

    /// Excluded directories (relative to the source root)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_dirs: Vec<String>,

    /// Entries that were neither directories nor regular files
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

impl CopyReport {
    pub fn new(
        source_root: impl Into<String>,
        target_root: impl Into<String>,
        source_name: impl Into<String>,
        target_name: impl Into<String>,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            target_root: target_root.into(),
            source_name: source_name.into(),
            target_name: target_name.into(),
            ..Default::default()
        }
    }

    pub fn push_file(&mut self, record: FileRecord) {
        self.files.push(record);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes).sum()
    }

    pub fn total_path_rewrites(&self) -> usize {
        self.files.iter().map(|f| f.path_rewrites).sum()
    }

    pub fn renamed_count(&self) -> usize {
        self.files.iter().filter(|f| f.renamed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: &str, bytes: u64, renamed: bool, path_rewrites: usize) -> FileRecord {
        FileRecord {
            source: source.to_string(),
            destination: source.to_string(),
            bytes,
            renamed,
            path_rewrites,
        }
    }

    #[test]
    fn test_report_totals() {
        let mut report = CopyReport::new("/a/Proj", "/b/New", "Proj", "New");
        assert!(report.is_empty());

        report.push_file(record("a.txt", 10, false, 2));
        report.push_file(record("Proj.sln", 5, true, 0));

        assert_eq!(report.len(), 2);
        assert_eq!(report.total_bytes(), 15);
        assert_eq!(report.total_path_rewrites(), 2);
        assert_eq!(report.renamed_count(), 1);
    }

    #[test]
    fn test_empty_lists_are_not_serialized() {
        let report = CopyReport::new("/a/Proj", "/b/New", "Proj", "New");
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("excluded_dirs"));
        assert!(!json.contains("skipped"));
        assert!(json.contains("\"files\":[]"));
    }
}
