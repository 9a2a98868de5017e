//! Relative path resolution
//!
//! Finds the first relative path fragment on a line (two or more chained
//! `..` steps plus the name that follows) and replaces it with the absolute
//! path it points to from a base directory.
//!
//! A fragment ends at the first `/`, `\` or `;` after that name, so only the
//! leading part of a longer path is resolved and the rest is kept verbatim:
//! `../../inc/a.h` becomes `<abs>/inc/a.h`, and in `..\..\inc;..\..\lib`
//! only the first list entry is touched. Spaces do not end a fragment.

use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::borrow::Cow;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::error::ResolveError;
use crate::core::paths::{absolutize, clean_path, path_from_bytes, path_to_bytes};
use crate::core::util::{find_bytes, replace_all};

/// Macro some build tools use for "this project's directory"
pub const PROJECT_DIR_TOKEN: &[u8] = b"$(ProjectDir)";

/// Two or more chained `..` steps, then one name made of anything except
/// separators, `;`, quotes, `<>|:*?` and control characters.
static RELATIVE_FRAGMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?-u)\.\.(?:[\\/]{1,2}\.\.)+[\\/]*[^"'<>|:*?;\\/\x00-\x1F]*"#)
        .expect("Invalid RELATIVE_FRAGMENT_RE regex")
});

/// Span of the first relative path fragment in `text`
pub fn find_relative_fragment(text: &[u8]) -> Option<Range<usize>> {
    RELATIVE_FRAGMENT_RE.find(text).map(|m| m.range())
}

/// Join `fragment` onto `base` and clean the result.
///
/// Both `/` and `\` are separators inside the fragment.
pub fn resolve_fragment(base: &Path, fragment: &[u8]) -> Result<PathBuf, ResolveError> {
    let fragment: Vec<u8> = fragment
        .iter()
        .map(|&b| if b == b'\\' { b'/' } else { b })
        .collect();
    let fragment = path_from_bytes(&fragment).ok_or(ResolveError::UnrepresentableFragment)?;
    let base = absolutize(base).map_err(ResolveError::CurrentDir)?;
    Ok(clean_path(&base.join(fragment)))
}

/// Remove `$(ProjectDir)\` and `$(ProjectDir)/` from a line
pub fn strip_project_dir_token(line: &[u8]) -> Cow<'_, [u8]> {
    if find_bytes(line, PROJECT_DIR_TOKEN).is_none() {
        return Cow::Borrowed(line);
    }
    let text = replace_all(Cow::Borrowed(line), b"$(ProjectDir)\\", b"");
    replace_all(text, b"$(ProjectDir)/", b"")
}

/// Result of running the resolver over one line
#[derive(Debug)]
pub struct LineResolution<'a> {
    pub text: Cow<'a, [u8]>,
    /// Whether a fragment was replaced by an absolute path
    pub rewritten: bool,
}

/// Stateless relative-to-absolute path rewriter
#[derive(Debug, Clone, Copy)]
pub struct PathResolver {
    strip_project_dir_token: bool,
}

impl PathResolver {
    pub fn new(strip_project_dir_token: bool) -> Self {
        Self {
            strip_project_dir_token,
        }
    }

    /// Rewrite the first relative path fragment on `line` against `base`.
    ///
    /// Never fails: if the fragment cannot be resolved the line comes back
    /// with the fragment untouched.
    pub fn resolve_line<'a>(&self, line: &'a [u8], base: &Path) -> LineResolution<'a> {
        let text = if self.strip_project_dir_token {
            strip_project_dir_token(line)
        } else {
            Cow::Borrowed(line)
        };

        match self.try_resolve(&text, base) {
            Ok(Some(resolved)) => LineResolution {
                text: Cow::Owned(resolved),
                rewritten: true,
            },
            Ok(None) => LineResolution {
                text,
                rewritten: false,
            },
            Err(err) => {
                debug!(error = %err, "leaving relative path unresolved");
                LineResolution {
                    text,
                    rewritten: false,
                }
            }
        }
    }

    /// `Ok(None)` when there is nothing to rewrite.
    pub fn try_resolve(&self, text: &[u8], base: &Path) -> Result<Option<Vec<u8>>, ResolveError> {
        let Some(span) = find_relative_fragment(text) else {
            return Ok(None);
        };
        let fragment = &text[span.clone()];

        let is_absolute = path_from_bytes(fragment)
            .map(|p| p.is_absolute())
            .unwrap_or(false);
        if is_absolute {
            return Ok(None);
        }

        let resolved = resolve_fragment(base, fragment)?;
        let resolved_bytes = path_to_bytes(&resolved)
            .ok_or_else(|| ResolveError::UnrepresentablePath(resolved.clone()))?;

        let mut out = Vec::with_capacity(text.len() + resolved_bytes.len());
        out.extend_from_slice(&text[..span.start]);
        out.extend_from_slice(resolved_bytes);
        out.extend_from_slice(&text[span.end..]);
        Ok(Some(out))
    }
}
