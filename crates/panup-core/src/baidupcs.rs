use std::path::{Path, PathBuf};
use std::process::Command;

use crate::pcs::{Credentials, PcsRunner};
use crate::Result;

/// ダウンロードした BaiduPCS-Go バイナリのラッパー
///
/// サブコマンドと引数の綴り（`login -bduss= -stoken=` / `upload`）は
/// 外部バイナリ側の固定契約。
pub struct BaiduPcsClient {
    exe: PathBuf,
}

impl BaiduPcsClient {
    pub fn new(exe: PathBuf) -> Self {
        Self { exe }
    }

    /// バイナリが通常ファイルとして存在するか確認
    pub fn is_available(&self) -> bool {
        self.exe.is_file()
    }

    pub fn exe_path(&self) -> &Path {
        &self.exe
    }
}

impl PcsRunner for BaiduPcsClient {
    fn login(&self, credentials: &Credentials) -> Result<()> {
        let output = Command::new(&self.exe)
            .arg("login")
            .arg(format!("-bduss={}", credentials.bduss))
            .arg(format!("-stoken={}", credentials.stoken))
            .output()
            .map_err(|e| crate::Error::Auth(format!("Failed to run {}: {}", self.exe.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(crate::Error::Auth(format!(
                "login exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }

    fn upload(&self, local_path: &Path, remote_dir: &str) -> Result<()> {
        let output = Command::new(&self.exe)
            .arg("upload")
            .arg(local_path)
            .arg(remote_dir)
            .output()
            .map_err(|e| {
                crate::Error::Upload(format!("Failed to run {}: {}", self.exe.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(crate::Error::Upload(format!(
                "upload of {} exited with {}: {}",
                local_path.display(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_available() {
        let client = BaiduPcsClient::new(PathBuf::from("/nonexistent/BaiduPCS-Go"));
        assert!(!client.is_available());
    }

    #[test]
    fn test_is_available_for_regular_file() {
        use tempfile::TempDir;

        let temp = TempDir::new().unwrap();
        let exe = temp.path().join("BaiduPCS-Go");
        std::fs::write(&exe, b"bin").unwrap();

        let client = BaiduPcsClient::new(exe.clone());
        assert!(client.is_available());
        assert_eq!(client.exe_path(), exe.as_path());

        // ディレクトリは実行ファイルとして扱わない
        let client = BaiduPcsClient::new(temp.path().to_path_buf());
        assert!(!client.is_available());
    }

    #[test]
    fn test_spawn_failure_is_auth_error() {
        let client = BaiduPcsClient::new(PathBuf::from("/nonexistent/BaiduPCS-Go"));
        let credentials = Credentials {
            bduss: "b".to_string(),
            stoken: "s".to_string(),
        };

        let result = client.login(&credentials);
        assert!(matches!(result, Err(crate::Error::Auth(_))));
    }

    #[test]
    fn test_spawn_failure_is_upload_error() {
        let client = BaiduPcsClient::new(PathBuf::from("/nonexistent/BaiduPCS-Go"));
        let result = client.upload(Path::new("a.txt"), "/backup");
        assert!(matches!(result, Err(crate::Error::Upload(_))));
    }
}
