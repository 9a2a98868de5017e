//! Tree copy orchestration
//!
//! Walks the source tree top-down in file name order, skips excluded
//! directories, and streams every file line by line through the name
//! rewriter and (optionally) the path resolver into a freshly created
//! destination file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::core::config::CopyConfig;
use crate::core::error::{CopyError, CopyResult};
use crate::core::model::{CopyReport, FileRecord};
use crate::core::paths::{absolutize, is_within_root, make_relative, project_name};
use crate::engine::resolver::PathResolver;
use crate::engine::rewrite::NameRewriter;

/// Source and target roots after validation
#[derive(Debug, Clone)]
struct CopyPlan {
    source_root: PathBuf,
    target_root: PathBuf,
    source_name: String,
    target_name: String,
}

impl CopyPlan {
    /// Check preconditions. Root paths are rejected before anything touches
    /// the filesystem.
    fn new(source: &Path, target: &Path) -> CopyResult<Self> {
        let source_root = absolutize(source).map_err(|e| CopyError::io(source, e))?;
        let target_root = absolutize(target).map_err(|e| CopyError::io(target, e))?;

        let source_name = project_name(&source_root)
            .ok_or_else(|| CopyError::SourceIsRoot(source.to_path_buf()))?;
        let target_name = project_name(&target_root)
            .ok_or_else(|| CopyError::TargetIsRoot(target.to_path_buf()))?;

        let source_name = source_name
            .to_str()
            .ok_or_else(|| CopyError::NonUtf8Name(source_root.clone()))?
            .to_string();
        let target_name = target_name
            .to_str()
            .ok_or_else(|| CopyError::NonUtf8Name(target_root.clone()))?
            .to_string();

        if !source_root.is_dir() {
            return Err(CopyError::SourceNotDirectory(source_root));
        }
        if is_within_root(&target_root, &source_root) {
            return Err(CopyError::TargetInsideSource {
                target: target_root,
                source_root,
            });
        }

        Ok(Self {
            source_root,
            target_root,
            source_name,
            target_name,
        })
    }

    fn rewriter(&self) -> NameRewriter {
        NameRewriter::new(
            &self.source_root.to_string_lossy(),
            &self.target_root.to_string_lossy(),
            &self.source_name,
            &self.target_name,
        )
    }

    fn report(&self) -> CopyReport {
        CopyReport::new(
            self.source_root.to_string_lossy(),
            self.target_root.to_string_lossy(),
            self.source_name.as_str(),
            self.target_name.as_str(),
        )
    }
}

/// Copies a project tree under a new name
#[derive(Debug, Clone)]
pub struct TreeCopier {
    config: CopyConfig,
    resolver: PathResolver,
}

impl TreeCopier {
    pub fn new(config: CopyConfig) -> Self {
        let resolver = PathResolver::new(config.strip_project_dir_token);
        Self { config, resolver }
    }

    /// Copy `source` to `target`.
    ///
    /// Stops at the first error. Files and directories created before that
    /// point stay on disk.
    pub fn copy_tree(&self, source: &Path, target: &Path) -> CopyResult<CopyReport> {
        let plan = CopyPlan::new(source, target)?;
        let rewriter = plan.rewriter();
        let mut report = plan.report();

        info!(
            source = %plan.source_root.display(),
            target = %plan.target_root.display(),
            "copying project {} as {}",
            plan.source_name,
            plan.target_name
        );

        let mut walker = WalkDir::new(&plan.source_root)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = entry?;
            let path = entry.path();
            let relative = make_relative(path, &plan.source_root).unwrap_or_default();

            if entry.file_type().is_dir() {
                if self.config.is_excluded_dir(&relative) {
                    info!(dir = %relative, "excluding directory");
                    report.excluded_dirs.push(relative);
                    walker.skip_current_dir();
                }
                continue;
            }

            // Follows symlinks, so links to regular files are copied by content
            if !path.is_file() {
                warn!(entry = %relative, "skipping entry that is not a regular file");
                report.skipped.push(relative);
                continue;
            }

            let record = self.copy_file(&plan, &rewriter, path)?;
            debug!(
                source = %record.source,
                destination = %record.destination,
                path_rewrites = record.path_rewrites,
                "copied file"
            );
            report.push_file(record);
        }

        Ok(report)
    }

    fn copy_file(
        &self,
        plan: &CopyPlan,
        rewriter: &NameRewriter,
        source_path: &Path,
    ) -> CopyResult<FileRecord> {
        let source_dir = source_path.parent().unwrap_or(&plan.source_root);
        let relative_dir = source_dir
            .strip_prefix(&plan.source_root)
            .unwrap_or_else(|_| Path::new(""));

        let dest_dir = plan.target_root.join(relative_dir);
        fs::create_dir_all(&dest_dir).map_err(|e| CopyError::io(&dest_dir, e))?;

        let file_name = source_path.file_name().unwrap_or_default();
        let renamed = rewriter.rename_file(file_name);
        let dest_path = match &renamed {
            Some(name) => dest_dir.join(name),
            None => dest_dir.join(file_name),
        };

        let source_file = File::open(source_path).map_err(|e| CopyError::io(source_path, e))?;
        let dest_file = create_new(&dest_path)?;

        // Opt-out suffixes are ASCII, so a lossy name still matches them
        let fix_paths = self
            .config
            .rewrites_paths_in(&file_name.to_string_lossy());

        let mut reader = BufReader::new(source_file);
        let mut writer = BufWriter::new(dest_file);
        let mut line = Vec::new();
        let mut bytes = 0u64;
        let mut path_rewrites = 0;

        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(|e| CopyError::io(source_path, e))?;
            if read == 0 {
                break;
            }

            let named = rewriter.rewrite_line(&line);
            let resolution;
            let out: &[u8] = if fix_paths {
                resolution = self.resolver.resolve_line(&named, source_dir);
                if resolution.rewritten {
                    path_rewrites += 1;
                }
                &*resolution.text
            } else {
                &*named
            };

            writer
                .write_all(out)
                .map_err(|e| CopyError::io(&dest_path, e))?;
            bytes += out.len() as u64;
        }
        writer.flush().map_err(|e| CopyError::io(&dest_path, e))?;

        Ok(FileRecord {
            source: make_relative(source_path, &plan.source_root).unwrap_or_default(),
            destination: make_relative(&dest_path, &plan.target_root).unwrap_or_default(),
            bytes,
            renamed: renamed.is_some(),
            path_rewrites,
        })
    }
}

/// Create a file that must not exist yet. The existence check and the
/// creation are one step, so nothing already on disk is ever truncated.
fn create_new(path: &Path) -> CopyResult<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => CopyError::DestinationExists {
                path: path.to_path_buf(),
            },
            _ => CopyError::io(path, e),
        })
}
