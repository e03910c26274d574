use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Result;

/// アップロード履歴
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UploadHistory {
    pub runs: Vec<UploadRun>,
}

/// 一回の run の記録
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRun {
    /// run ID
    pub id: String,
    /// 実行日時
    pub created_at: DateTime<Utc>,
    /// アップロード先リモートディレクトリ
    pub remote_dir: String,
    /// アップロードしたファイル
    pub items: Vec<UploadItem>,
    /// 合計サイズ
    pub total_size: u64,
}

/// アップロードした一件のファイル
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadItem {
    /// ローカルパス
    pub local_path: PathBuf,
    /// SHA256 ハッシュ
    pub sha256: String,
    /// サイズ
    pub size: u64,
}

impl UploadHistory {
    /// 履歴ファイルのパスを取得
    pub fn history_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| crate::Error::Config("HOME environment variable not set".into()))?;
        Ok(PathBuf::from(home).join(".panup").join("upload_history.json"))
    }

    /// 履歴を読み込み
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::history_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(UploadHistory::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read upload history: {}", e)))?;

        let history: UploadHistory = serde_json::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse upload history: {}", e)))?;

        Ok(history)
    }

    /// 履歴を保存
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::history_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                crate::Error::Config(format!("Failed to create history directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(format!("Failed to serialize upload history: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| crate::Error::Config(format!("Failed to write upload history: {}", e)))?;

        Ok(())
    }

    /// run を追加
    pub fn add_run(&mut self, run: UploadRun) {
        self.runs.push(run);
    }

    /// ID で run を検索
    pub fn find_by_id(&self, id: &str) -> Option<&UploadRun> {
        self.runs.iter().find(|r| r.id == id)
    }
}

impl UploadRun {
    /// 新しい run を作成
    pub fn new(remote_dir: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            remote_dir,
            items: Vec::new(),
            total_size: 0,
        }
    }

    /// アイテムを追加
    pub fn add_item(&mut self, item: UploadItem) {
        self.total_size += item.size;
        self.items.push(item);
    }
}

impl UploadItem {
    /// ローカルファイルから作成（サイズとハッシュを計測）
    pub fn from_file(local_path: &Path) -> Result<Self> {
        let metadata = fs::metadata(local_path)?;
        let sha256 = file_sha256(local_path)?;

        Ok(Self {
            local_path: local_path.to_path_buf(),
            sha256,
            size: metadata.len(),
        })
    }
}

/// ファイルの SHA256 ハッシュを計算
pub fn file_sha256(path: &Path) -> Result<String> {
    use sha2::{Digest, Sha256};
    use std::io::Read;

    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
