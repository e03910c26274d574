use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::Result;

/// ZIP アーカイブを展開先ディレクトリに展開
///
/// 展開先は存在しなければ作成する。アーカイブ内部のディレクトリ構造は
/// 事前に分からないためそのまま保持する（バイナリがネストしている
/// リリースがある）。
pub fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<()> {
    fs::create_dir_all(dest_dir)?;

    let file = File::open(archive_path).map_err(|e| {
        crate::Error::Extraction(format!("Failed to open {}: {}", archive_path.display(), e))
    })?;

    let mut archive = zip::ZipArchive::new(file).map_err(|e| {
        crate::Error::Extraction(format!("Failed to read {}: {}", archive_path.display(), e))
    })?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| crate::Error::Extraction(format!("Failed to read entry {}: {}", i, e)))?;

        // 展開先の外を指すエントリは拒否
        let relative = entry.enclosed_name().ok_or_else(|| {
            crate::Error::Extraction(format!("Unsafe entry path in archive: {}", entry.name()))
        })?;
        let outpath = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&outpath)?;
            io::copy(&mut entry, &mut outfile).map_err(|e| {
                crate::Error::Extraction(format!(
                    "Failed to extract {}: {}",
                    outpath.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
