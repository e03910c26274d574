use std::path::{Path, PathBuf};

use crate::pcs::{Credentials, PcsRunner};
use crate::Result;

/// 認証済みセッション
///
/// `login` が唯一のコンストラクタなので、ログイン呼び出しが exit 0 で
/// 終わらない限りこの型の値は存在しない。アップロードが未認証のまま
/// 走ることはない。
pub struct Session<'a, R: PcsRunner> {
    runner: &'a R,
}

impl<'a, R: PcsRunner> Session<'a, R> {
    /// ログインして認証済みセッションに遷移
    pub fn login(runner: &'a R, credentials: &Credentials) -> Result<Self> {
        runner.login(credentials)?;
        Ok(Self { runner })
    }

    /// ファイルを一件アップロード
    pub fn upload(&self, local_path: &Path, remote_dir: &str) -> Result<()> {
        self.runner.upload(local_path, remote_dir)
    }

    /// Upload Set を順番どおりに一件ずつアップロード
    ///
    /// 最初の失敗で残りを中断する（部分成功の報告はしない）。
    pub fn upload_all(
        &self,
        files: &[PathBuf],
        remote_dir: &str,
        mut progress: impl FnMut(&Path),
    ) -> Result<usize> {
        for file in files {
            progress(file);
            self.upload(file, remote_dir)?;
        }
        Ok(files.len())
    }
}

/// Upload Set の検証 → ログイン → 順次アップロード
///
/// 空の Upload Set は認証を試みる前に失敗する。
pub fn run_upload<R: PcsRunner>(
    runner: &R,
    credentials: &Credentials,
    files: &[PathBuf],
    remote_dir: &str,
    progress: impl FnMut(&Path),
) -> Result<usize> {
    if files.is_empty() {
        return Err(crate::Error::NoMatch("upload set is empty".to_string()));
    }

    let session = Session::login(runner, credentials)?;
    session.upload_all(files, remote_dir, progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// 呼び出しを記録するテスト用 runner
    struct RecordingRunner {
        login_ok: bool,
        fail_upload_of: Option<&'static str>,
        calls: RefCell<Vec<String>>,
    }

    impl RecordingRunner {
        fn new() -> Self {
            Self {
                login_ok: true,
                fail_upload_of: None,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl PcsRunner for RecordingRunner {
        fn login(&self, _credentials: &Credentials) -> Result<()> {
            self.calls.borrow_mut().push("login".to_string());
            if self.login_ok {
                Ok(())
            } else {
                Err(crate::Error::Auth("login exited with 1".to_string()))
            }
        }

        fn upload(&self, local_path: &Path, remote_dir: &str) -> Result<()> {
            let name = local_path.display().to_string();
            self.calls
                .borrow_mut()
                .push(format!("upload {} {}", name, remote_dir));
            if self.fail_upload_of == Some(local_path.to_str().unwrap()) {
                Err(crate::Error::Upload(format!("upload of {} exited with 1", name)))
            } else {
                Ok(())
            }
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            bduss: "bduss-value".to_string(),
            stoken: "stoken-value".to_string(),
        }
    }

    #[test]
    fn test_uploads_in_match_order() -> Result<()> {
        let runner = RecordingRunner::new();
        let files = vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")];

        let count = run_upload(&runner, &credentials(), &files, "/backup", |_| {})?;

        assert_eq!(count, 2);
        assert_eq!(
            runner.calls(),
            vec!["login", "upload a.txt /backup", "upload b.txt /backup"]
        );
        Ok(())
    }

    #[test]
    fn test_empty_set_fails_before_login() {
        let runner = RecordingRunner::new();

        let result = run_upload(&runner, &credentials(), &[], "/backup", |_| {});

        assert!(matches!(result, Err(crate::Error::NoMatch(_))));
        // 認証もアップロードも一切呼ばれない
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_failed_login_prevents_uploads() {
        let mut runner = RecordingRunner::new();
        runner.login_ok = false;
        let files = vec![PathBuf::from("a.txt")];

        let result = run_upload(&runner, &credentials(), &files, "/backup", |_| {});

        assert!(matches!(result, Err(crate::Error::Auth(_))));
        assert_eq!(runner.calls(), vec!["login"]);
    }

    #[test]
    fn test_failed_upload_aborts_remaining() {
        let mut runner = RecordingRunner::new();
        runner.fail_upload_of = Some("b.txt");
        let files = vec![
            PathBuf::from("a.txt"),
            PathBuf::from("b.txt"),
            PathBuf::from("c.txt"),
        ];

        let result = run_upload(&runner, &credentials(), &files, "/backup", |_| {});

        assert!(matches!(result, Err(crate::Error::Upload(_))));
        // c.txt には到達しない
        assert_eq!(
            runner.calls(),
            vec!["login", "upload a.txt /backup", "upload b.txt /backup"]
        );
    }

    #[test]
    fn test_progress_callback_sees_each_file() -> Result<()> {
        let runner = RecordingRunner::new();
        let files = vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")];
        let mut seen = Vec::new();

        run_upload(&runner, &credentials(), &files, "/backup", |path| {
            seen.push(path.to_path_buf());
        })?;

        assert_eq!(seen, files);
        Ok(())
    }
}
