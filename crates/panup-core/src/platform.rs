/// OS タグ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Windows,
    MacOs,
    Linux,
}

/// CPU アーキテクチャタグ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X64,
    Arm64,
    Arm,
    Other,
}

/// プラットフォーム記述子（OS + アーキテクチャ）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Os {
    /// OS タグ文字列から変換（未知のタグは Linux にフォールバック）
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "windows" | "win32" => Os::Windows,
            "macos" | "darwin" => Os::MacOs,
            _ => Os::Linux,
        }
    }
}

impl Arch {
    /// アーキテクチャタグ文字列から変換
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "x86_64" | "x64" | "amd64" => Arch::X64,
            "aarch64" | "arm64" => Arch::Arm64,
            "arm" | "armv7" => Arch::Arm,
            _ => Arch::Other,
        }
    }
}

impl Platform {
    /// 実行環境からプラットフォームを検出（プロセス起動時に一度だけ）
    pub fn current() -> Self {
        Self::from_tags(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// タグ文字列のペアから構築（純粋関数、テスト用）
    pub fn from_tags(os: &str, arch: &str) -> Self {
        Self {
            os: Os::from_tag(os),
            arch: Arch::from_tag(arch),
        }
    }
}
