//! Textual `#include` expansion for shader sources.
//!
//! A shader stage is read from disk and every `#include "path"` directive
//! line is replaced in place by the contents of the named file, until no
//! directive remains. Included paths resolve against the process working
//! directory, not against the including file.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::warn;

const INCLUDE_TOKEN: &str = "#include";

/// Upper bound on substitutions per root file. Non-cyclic shader trees sit
/// orders of magnitude below this; hitting it means a file includes itself.
const MAX_SUBSTITUTIONS: usize = 1024;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("cannot read root shader '{path}': {source}")]
    Root {
        path: String,
        source: std::io::Error,
    },

    #[error("include expansion exceeded the substitution limit in '{path}' (include cycle?)")]
    IncludeLimit { path: String },
}

/// A directive found in the working buffer: the byte span of the directive
/// line (newline excluded) and the extracted target path.
struct IncludeDirective {
    start: usize,
    end: usize,
    target: String,
}

/// Locate the first `#include` directive in `source`.
///
/// The directive grammar is fixed: the target sits two bytes after the
/// token (space plus opening quote) and one byte before the line end (the
/// closing quote). Returns `None` when no token is present or the line is
/// too short to carry a target, which ends resolution.
fn find_include(source: &str) -> Option<IncludeDirective> {
    let start = source.find(INCLUDE_TOKEN)?;
    let end = source[start..]
        .find('\n')
        .map_or(source.len(), |i| start + i);

    let target_start = start + INCLUDE_TOKEN.len() + 2;
    let target_end = end.checked_sub(1)?;
    if target_start >= target_end {
        return None;
    }

    Some(IncludeDirective {
        start,
        end,
        target: source[target_start..target_end].to_string(),
    })
}

/// Read `root` and flatten all include directives into one source string.
///
/// A missing *included* file is not fatal: a diagnostic is logged and the
/// directive is replaced by the empty string. Only an unreadable root file
/// (or a runaway include cycle) aborts.
pub fn resolve_includes(root: &Path) -> Result<String, PreprocessError> {
    let mut source = fs::read_to_string(root).map_err(|source| PreprocessError::Root {
        path: root.display().to_string(),
        source,
    })?;

    let mut substitutions = 0;
    // Re-scan from the start after every splice: inserted text may itself
    // carry directives, and they must expand in document order.
    while let Some(directive) = find_include(&source) {
        if substitutions >= MAX_SUBSTITUTIONS {
            return Err(PreprocessError::IncludeLimit {
                path: root.display().to_string(),
            });
        }
        substitutions += 1;

        let contents = match fs::read_to_string(&directive.target) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(
                    include = %directive.target,
                    root = %root.display(),
                    "included file not readable, splicing empty: {e}"
                );
                String::new()
            }
        };

        source.replace_range(directive.start..directive.end, &contents);
    }

    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Write `contents` under `dir` and return its absolute path, so the
    /// cwd-based include resolution finds it wherever the tests run.
    fn write(dir: &TempDir, name: &str, contents: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn source_without_includes_is_unchanged() {
        let dir = TempDir::new().unwrap();
        let root = write(&dir, "root.wgsl", "fn main() {}\nlet x = 1.0;\n");

        let result = resolve_includes(Path::new(&root)).unwrap();
        assert_eq!(result, "fn main() {}\nlet x = 1.0;\n");
    }

    #[test]
    fn directive_line_is_replaced_verbatim() {
        let dir = TempDir::new().unwrap();
        let b = write(&dir, "b.wgsl", "X");
        let root = write(&dir, "root.wgsl", &format!("A\n#include \"{b}\"\nC\n"));

        let result = resolve_includes(Path::new(&root)).unwrap();
        assert_eq!(result, "A\nX\nC\n");
    }

    #[test]
    fn nested_includes_expand_in_document_order() {
        let dir = TempDir::new().unwrap();
        let inner = write(&dir, "inner.wgsl", "INNER");
        let mid = write(&dir, "mid.wgsl", &format!("M1\n#include \"{inner}\"\nM2"));
        let other = write(&dir, "other.wgsl", "OTHER");
        let root = write(
            &dir,
            "root.wgsl",
            &format!("top\n#include \"{mid}\"\n#include \"{other}\"\nbottom\n"),
        );

        let result = resolve_includes(Path::new(&root)).unwrap();
        assert_eq!(result, "top\nM1\nINNER\nM2\nOTHER\nbottom\n");
        assert!(!result.contains("#include"));
    }

    #[test]
    fn missing_include_splices_empty_and_continues() {
        let dir = TempDir::new().unwrap();
        let b = write(&dir, "b.wgsl", "X");
        let root = write(
            &dir,
            "root.wgsl",
            &format!("A\n#include \"/no/such/file.wgsl\"\n#include \"{b}\"\nC\n"),
        );

        let result = resolve_includes(Path::new(&root)).unwrap();
        assert_eq!(result, "A\n\nX\nC\n");
    }

    #[test]
    fn missing_root_is_an_error() {
        let err = resolve_includes(Path::new("/no/such/root.wgsl")).unwrap_err();
        assert!(matches!(err, PreprocessError::Root { .. }));
    }

    #[test]
    fn self_include_hits_the_substitution_cap() {
        let dir = TempDir::new().unwrap();
        let root_path = dir.path().join("cycle.wgsl");
        let root = root_path.to_str().unwrap().to_string();
        fs::write(&root_path, format!("#include \"{root}\"\n")).unwrap();

        let err = resolve_includes(Path::new(&root)).unwrap_err();
        assert!(matches!(err, PreprocessError::IncludeLimit { .. }));
    }

    #[test]
    fn directive_without_target_stops_resolution() {
        let dir = TempDir::new().unwrap();
        // Token present but the line is too short to carry a quoted path.
        let root = write(&dir, "root.wgsl", "A\n#include\nB\n");

        let result = resolve_includes(Path::new(&root)).unwrap();
        assert_eq!(result, "A\n#include\nB\n");
    }
}
