use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::release::TOOL_NAME;
use crate::Result;

/// 展開ツリーから BaiduPCS-Go 実行ファイルを探索
///
/// ファイル名の先頭一致（大文字小文字を区別しない）で判定するため、
/// Windows の `.exe` 付きバイナリもそのまま一致する。ディレクトリは
/// 候補にならない。複数一致した場合はファイル名順ソート済み走査の
/// 最初の一件を決定的に選択する。
pub fn find_executable(dir: &Path) -> Result<PathBuf> {
    let needle = TOOL_NAME.to_lowercase();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if name.starts_with(&needle) {
            return Ok(entry.path().to_path_buf());
        }
    }

    Err(crate::Error::NotFound(format!(
        "No {} executable under {}",
        TOOL_NAME,
        dir.display()
    )))
}

/// 実行権限を付与（unix のみ、それ以外は no-op）
///
/// 呼び出し側は失敗を警告として扱い、run は中断しない。
#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
