use std::fs;
use std::path::Path;

use crate::Result;

/// アーカイブを URL からローカルパスへダウンロード
///
/// リトライは行わない。失敗は即座に run 全体の失敗となる。
pub fn download(url: &str, dest: &Path) -> Result<()> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("panup/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| crate::Error::Download(format!("Failed to build HTTP client: {}", e)))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| crate::Error::Download(format!("Failed to fetch {}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(crate::Error::Download(format!(
            "Unexpected status {} for {}",
            response.status(),
            url
        )));
    }

    let bytes = response
        .bytes()
        .map_err(|e| crate::Error::Download(format!("Failed to read response body: {}", e)))?;

    fs::write(dest, &bytes)
        .map_err(|e| crate::Error::Download(format!("Failed to write {}: {}", dest.display(), e)))?;

    // 転送後にファイルが存在しなければダウンロード失敗扱い
    if !dest.is_file() {
        return Err(crate::Error::Download(format!(
            "Archive missing after download: {}",
            dest.display()
        )));
    }

    Ok(())
}
