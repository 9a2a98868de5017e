//! Project name substitution for file names and file contents

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::path::MAIN_SEPARATOR;

use crate::core::util::replace_all;
#[cfg(unix)]
use crate::core::util::replace_bytes;

/// Rewrites one line at a time from the source project to the target project.
///
/// Per line, in order:
/// 1. `<source root><sep>` becomes `<target root><sep>`
/// 2. the source project name becomes the target project name
/// 3. the upper-cased source name becomes the upper-cased target name
///
/// Step 1 runs first because step 2 would otherwise eat the name out of every
/// root path occurrence. Step 3 always runs, even when step 2 already covered
/// it (names that are all upper case to begin with).
#[derive(Debug, Clone)]
pub struct NameRewriter {
    source_root: Vec<u8>,
    target_root: Vec<u8>,
    source_name: String,
    target_name: String,
    source_upper: String,
    target_upper: String,
}

impl NameRewriter {
    pub fn new(source_root: &str, target_root: &str, source_name: &str, target_name: &str) -> Self {
        Self {
            source_root: with_trailing_separator(source_root),
            target_root: with_trailing_separator(target_root),
            source_name: source_name.to_string(),
            target_name: target_name.to_string(),
            source_upper: source_name.to_uppercase(),
            target_upper: target_name.to_uppercase(),
        }
    }

    pub fn rewrite_line<'a>(&self, line: &'a [u8]) -> Cow<'a, [u8]> {
        let text = replace_all(Cow::Borrowed(line), &self.source_root, &self.target_root);
        let text = replace_all(
            text,
            self.source_name.as_bytes(),
            self.target_name.as_bytes(),
        );
        replace_all(
            text,
            self.source_upper.as_bytes(),
            self.target_upper.as_bytes(),
        )
    }

    /// New file name, or `None` if the name does not mention the project.
    ///
    /// On unix the name is matched as raw bytes, so names that are not
    /// valid UTF-8 are renamed too.
    #[cfg(unix)]
    pub fn rename_file(&self, file_name: &OsStr) -> Option<OsString> {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        replace_bytes(
            file_name.as_bytes(),
            self.source_name.as_bytes(),
            self.target_name.as_bytes(),
        )
        .map(OsString::from_vec)
    }

    #[cfg(not(unix))]
    pub fn rename_file(&self, file_name: &OsStr) -> Option<OsString> {
        let name = file_name.to_str()?;
        if self.source_name.is_empty() || !name.contains(&self.source_name) {
            return None;
        }
        Some(name.replace(&self.source_name, &self.target_name).into())
    }
}

fn with_trailing_separator(path: &str) -> Vec<u8> {
    let mut bytes = path
        .trim_end_matches(|c| c == '/' || c == MAIN_SEPARATOR)
        .as_bytes()
        .to_vec();
    let mut sep = [0u8; 4];
    bytes.extend_from_slice(MAIN_SEPARATOR.encode_utf8(&mut sep).as_bytes());
    bytes
}
