//! Shader pair discovery and the interactive startup prompt.
//!
//! The viewer looks for `*.vert.wgsl` / `*.frag.wgsl` files in one flat
//! directory, lists the candidates per stage, and asks for an index on
//! stdin when there is more than one.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

pub const VERT_SUFFIX: &str = ".vert.wgsl";
pub const FRAG_SUFFIX: &str = ".frag.wgsl";

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("cannot read shader directory '{path}': {source}")]
    Dir {
        path: String,
        source: io::Error,
    },

    #[error("no '*{suffix}' shader found in '{path}'")]
    Missing { suffix: &'static str, path: String },
}

/// List files in `dir` whose name ends with `suffix`, sorted for a stable
/// prompt order.
pub fn discover(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, PickerError> {
    let entries = std::fs::read_dir(dir).map_err(|source| PickerError::Dir {
        path: dir.display().to_string(),
        source,
    })?;

    let mut found: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(suffix))
        })
        .collect();
    found.sort();
    Ok(found)
}

/// Turn the raw prompt reply into a candidate index: unparsable input falls
/// back to the first entry, out-of-range input clamps to the last.
pub fn clamp_choice(input: &str, len: usize) -> usize {
    let idx = input.trim().parse::<usize>().unwrap_or(0);
    idx.min(len - 1)
}

fn choose(stage: &str, candidates: &[PathBuf]) -> PathBuf {
    println!("{stage} shaders");
    for (i, path) in candidates.iter().enumerate() {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        println!("{i}: {name}");
    }

    if candidates.len() == 1 {
        println!();
        return candidates[0].clone();
    }

    print!("Shader: ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);

    candidates[clamp_choice(&line, candidates.len())].clone()
}

/// Discover and select one vertex and one fragment shader from `dir`.
pub fn pick_pair(dir: &Path) -> Result<(PathBuf, PathBuf), PickerError> {
    let verts = discover(dir, VERT_SUFFIX)?;
    let frags = discover(dir, FRAG_SUFFIX)?;

    if verts.is_empty() {
        return Err(PickerError::Missing {
            suffix: VERT_SUFFIX,
            path: dir.display().to_string(),
        });
    }
    if frags.is_empty() {
        return Err(PickerError::Missing {
            suffix: FRAG_SUFFIX,
            path: dir.display().to_string(),
        });
    }

    let vert = choose("Vertex", &verts);
    let frag = choose("Fragment", &frags);
    info!(vert = %vert.display(), frag = %frag.display(), "shader pair selected");

    Ok((vert, frag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn discover_filters_by_suffix_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.vert.wgsl"), "").unwrap();
        fs::write(dir.path().join("a.vert.wgsl"), "").unwrap();
        fs::write(dir.path().join("scene.frag.wgsl"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let verts = discover(dir.path(), VERT_SUFFIX).unwrap();
        let names: Vec<_> = verts
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["a.vert.wgsl", "b.vert.wgsl"]);

        let frags = discover(dir.path(), FRAG_SUFFIX).unwrap();
        assert_eq!(frags.len(), 1);
    }

    #[test]
    fn missing_stage_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("quad.vert.wgsl"), "").unwrap();

        let err = pick_pair(dir.path()).unwrap_err();
        assert!(matches!(err, PickerError::Missing { suffix, .. } if suffix == FRAG_SUFFIX));
    }

    #[test]
    fn choice_clamps_to_candidate_range() {
        assert_eq!(clamp_choice("1", 3), 1);
        assert_eq!(clamp_choice("99", 3), 2);
        assert_eq!(clamp_choice("garbage", 3), 0);
        assert_eq!(clamp_choice("  2 \n", 3), 2);
    }
}
