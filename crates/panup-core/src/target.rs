use std::path::PathBuf;

use crate::Result;

/// glob パターンからアップロード対象（Upload Set）を解決
///
/// ディレクトリは除外し通常ファイルのみを返す。順序は glob クレートの
/// ソート済み走査順（決定的）。一致ゼロは terminal failure。
pub fn resolve_targets(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern)
        .map_err(|e| crate::Error::Config(format!("Invalid glob pattern '{}': {}", pattern, e)))?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| crate::Error::Io(e.into_error()))?;
        if path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(crate::Error::NoMatch(pattern.to_string()));
    }

    Ok(files)
}
