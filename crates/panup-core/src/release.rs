use crate::platform::{Arch, Os, Platform};

/// 外部ツールの正規名
pub const TOOL_NAME: &str = "BaiduPCS-Go";

/// 既定の BaiduPCS-Go リリースバージョン
pub const DEFAULT_VERSION: &str = "3.9.6";

/// リリースアーカイブの配布元ベース URL
pub const RELEASE_BASE: &str = "https://github.com/qjfoidnh/BaiduPCS-Go/releases/download";

/// リリースアセットの解決（プラットフォーム + バージョン → アーカイブ名）
#[derive(Debug, Clone)]
pub struct Release {
    version: String,
    platform: Platform,
}

impl Release {
    pub fn new(version: impl Into<String>, platform: Platform) -> Self {
        Self {
            version: version.into(),
            platform,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// OS/アーキテクチャからアセットのバリアント名を選択
    ///
    /// 未知のアーキテクチャは各 OS ファミリーの既定バリアントにフォールバック
    /// （エラーにはしない）。
    fn variant(&self) -> &'static str {
        match self.platform.os {
            Os::Windows => match self.platform.arch {
                Arch::X64 => "windows-x64",
                Arch::Arm64 => "windows-arm",
                _ => "windows-x86",
            },
            Os::MacOs => match self.platform.arch {
                Arch::Arm64 => "darwin-osx-arm64",
                _ => "darwin-osx-amd64",
            },
            Os::Linux => match self.platform.arch {
                Arch::Arm64 => "linux-arm64",
                Arch::Arm => "linux-arm",
                _ => "linux-amd64",
            },
        }
    }

    /// アーカイブファイル名を構築（例: BaiduPCS-Go-v3.9.6-linux-amd64.zip）
    pub fn asset_name(&self) -> String {
        format!("{}-v{}-{}.zip", TOOL_NAME, self.version, self.variant())
    }

    /// ダウンロード URL を構築
    pub fn download_url(&self) -> String {
        format!("{}/v{}/{}", RELEASE_BASE, self.version, self.asset_name())
    }
}
