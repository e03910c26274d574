use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use panup_core::baidupcs::BaiduPcsClient;
use panup_core::config::Config;
use panup_core::manifest::{UploadHistory, UploadItem, UploadRun};
use panup_core::release::Release;
use panup_core::{extract, fetch, locate, session, target, utils, Platform};

#[derive(Parser)]
#[command(name = "panup")]
#[command(author, version, about = "Baidu ネットワークディスク アップロードツール", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// glob パターンに一致するファイルをアップロード
    Upload {
        /// アップロード対象の glob パターン
        #[arg(short, long)]
        target: String,

        /// アップロード先のリモートディレクトリ（省略時は設定ファイル）
        #[arg(short, long)]
        remote_dir: Option<String>,

        /// BDUSS トークン（省略時は環境変数 PANUP_BDUSS または設定ファイル）
        #[arg(long)]
        bduss: Option<String>,

        /// STOKEN トークン（省略時は環境変数 PANUP_STOKEN または設定ファイル）
        #[arg(long)]
        stoken: Option<String>,

        /// BaiduPCS-Go のリリースバージョン
        #[arg(long, default_value = panup_core::release::DEFAULT_VERSION)]
        pcs_version: String,

        /// 作業ディレクトリ（アーカイブと展開先）
        #[arg(long, default_value = ".panup")]
        work_dir: PathBuf,

        /// 結果を JSON で出力
        #[arg(long)]
        json: bool,
    },

    /// アップロード履歴を表示
    History {
        /// 特定の run ID の詳細を表示
        #[arg(long)]
        id: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            target,
            remote_dir,
            bduss,
            stoken,
            pcs_version,
            work_dir,
            json,
        } => upload(
            &target,
            remote_dir,
            bduss,
            stoken,
            &pcs_version,
            &work_dir,
            json,
        )?,
        Commands::History { id } => history(id)?,
    }

    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

fn upload(
    target: &str,
    remote_dir: Option<String>,
    bduss: Option<String>,
    stoken: Option<String>,
    pcs_version: &str,
    work_dir: &PathBuf,
    json: bool,
) -> Result<()> {
    let config = Config::load()?;

    // 認証情報: 項目ごとに フラグ > 環境変数 > 設定ファイル
    let credentials = config.resolve_credentials(bduss, stoken)?;

    let remote_dir = remote_dir
        .or_else(|| config.get_remote_dir())
        .ok_or_else(|| {
            anyhow::anyhow!("リモートディレクトリが指定されていません (--remote-dir または設定ファイル)")
        })?;

    // アップロード対象を先に解決（空なら認証前に失敗する）
    let files = target::resolve_targets(target)?;
    let total_size: u64 = files
        .iter()
        .filter_map(|f| std::fs::metadata(f).ok())
        .map(|m| m.len())
        .sum();

    println!(
        "\n{} 件のファイルを発見 (合計: {})\n",
        files.len().to_string().yellow().bold(),
        utils::format_size(total_size).yellow().bold()
    );

    for (i, file) in files.iter().enumerate() {
        let size = std::fs::metadata(file).map(|m| m.len()).unwrap_or(0);
        println!(
            "  {}. {} - {}",
            (i + 1).to_string().dimmed(),
            file.display().to_string().bright_blue(),
            utils::format_size(size).yellow()
        );
    }

    // BaiduPCS-Go を準備
    println!("\n{}", "📦 BaiduPCS-Go を準備中...".cyan().bold());

    let platform = Platform::current();
    let release = Release::new(pcs_version, platform);
    let url = release.download_url();

    std::fs::create_dir_all(work_dir)?;
    let archive_path = work_dir.join(release.asset_name());

    let pb = spinner(&format!("{} をダウンロード中...", release.asset_name()));
    fetch::download(&url, &archive_path)?;
    pb.finish_and_clear();

    let extract_dir = work_dir.join("baidupcs");
    let pb = spinner("アーカイブを展開中...");
    extract::extract_zip(&archive_path, &extract_dir)?;
    pb.finish_and_clear();

    let exe_path = locate::find_executable(&extract_dir)?;
    if let Err(e) = locate::make_executable(&exe_path) {
        // 実行権限の付与失敗は警告のみ（後続の起動で実害が分かる）
        println!(
            "{} {}",
            "⚠".yellow().bold(),
            format!("実行権限の設定に失敗しました: {}", e).yellow()
        );
    }

    let client = BaiduPcsClient::new(exe_path);
    if !client.is_available() {
        anyhow::bail!(
            "BaiduPCS-Go 実行ファイルが見つかりません: {}",
            client.exe_path().display()
        );
    }

    println!(
        "{} {}",
        "✓".green(),
        format!("実行ファイル: {}", client.exe_path().display()).dimmed()
    );

    // ログインしてアップロード
    println!("\n{}", "☁️  Baidu にログインしてアップロード中...".cyan().bold());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let uploaded = session::run_upload(&client, &credentials, &files, &remote_dir, |path| {
        pb.set_message(path.display().to_string());
        pb.inc(1);
    })?;

    pb.finish_and_clear();

    // アップロード履歴を記録（失敗しても run は成功扱い）
    let mut run = UploadRun::new(remote_dir.clone());
    for file in &files {
        match UploadItem::from_file(file) {
            Ok(item) => run.add_item(item),
            Err(e) => println!(
                "{} {}",
                "⚠".yellow(),
                format!("履歴項目の作成に失敗しました: {}", e).dimmed()
            ),
        }
    }
    let run_id = run.id.clone();

    match UploadHistory::load() {
        Ok(mut history) => {
            history.add_run(run);
            if let Err(e) = history.save() {
                println!(
                    "{} {}",
                    "⚠".yellow(),
                    format!("履歴の保存に失敗しました: {}", e).dimmed()
                );
            }
        }
        Err(e) => println!(
            "{} {}",
            "⚠".yellow(),
            format!("履歴の読み込みに失敗しました: {}", e).dimmed()
        ),
    }

    println!(
        "\n{} {} 件のファイルを {} にアップロードしました",
        "✅".green(),
        uploaded.to_string().green().bold(),
        remote_dir.bright_blue()
    );

    if json {
        let summary = serde_json::json!({
            "run_id": run_id,
            "remote_dir": remote_dir,
            "uploaded": uploaded,
            "files": files,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

fn history(id: Option<String>) -> Result<()> {
    let history = UploadHistory::load()?;

    if let Some(id) = id {
        let run = history
            .find_by_id(&id)
            .ok_or_else(|| anyhow::anyhow!("run が見つかりません: {}", id))?;

        println!(
            "\n{} {} ({})",
            "📋".cyan(),
            run.id.bright_blue(),
            run.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        println!(
            "  アップロード先: {}  合計: {}\n",
            run.remote_dir.bright_blue(),
            utils::format_size(run.total_size).yellow()
        );

        for (i, item) in run.items.iter().enumerate() {
            println!(
                "  {}. {} - {} ({})",
                (i + 1).to_string().dimmed(),
                item.local_path.display().to_string().bright_blue(),
                utils::format_size(item.size).yellow(),
                item.sha256[..16.min(item.sha256.len())].dimmed()
            );
        }

        return Ok(());
    }

    if history.runs.is_empty() {
        println!("{}", "アップロード履歴はまだありません".dimmed());
        return Ok(());
    }

    println!(
        "\n{} 件の run\n",
        history.runs.len().to_string().yellow().bold()
    );

    for (i, run) in history.runs.iter().enumerate() {
        println!(
            "  {}. {} {} → {} ({} 件, {})",
            (i + 1).to_string().dimmed(),
            run.created_at.format("%Y-%m-%d %H:%M"),
            run.id.bright_blue(),
            run.remote_dir,
            run.items.len(),
            utils::format_size(run.total_size).yellow()
        );
    }

    Ok(())
}
