use std::path::Path;

use crate::Result;

/// BaiduPCS-Go 認証情報（そのままコマンドライン引数へ渡す、解析しない）
#[derive(Debug, Clone)]
pub struct Credentials {
    pub bduss: String,
    pub stoken: String,
}

/// BaiduPCS-Go バイナリ呼び出しの共通インターフェース
pub trait PcsRunner {
    /// ログイン（認証）を行う
    fn login(&self, credentials: &Credentials) -> Result<()>;

    /// ファイルをリモートディレクトリへアップロード
    fn upload(&self, local_path: &Path, remote_dir: &str) -> Result<()>;
}
