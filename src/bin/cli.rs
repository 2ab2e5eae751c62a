//! h-downloader 命令行入口：直链单个/批量下载，以及（`chromium` feature）过反爬关卡并保存凭证。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use h_downloader::config::AppConfig;
use h_downloader::credential::SessionCredentials;
use h_downloader::orchestrator::{DownloadTarget, TaskOrchestrator, TaskProgress};

#[derive(Parser)]
#[command(name = "h-downloader")]
#[command(about = "分片并发、可续传的视频下载器", long_about = None)]
struct Cli {
    /// 输出目录（覆盖 HDL_OUTPUT_DIR）
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// 会话凭证 JSON（由 `gate` 子命令导出）
    #[arg(short, long, global = true)]
    cookies: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 下载单个直链
    Fetch {
        url: String,
        /// 保存用的标题，缺省取 URL 最后一段
        #[arg(short, long)]
        title: Option<String>,
    },
    /// 批量下载：文件每行 `<直链> <标题>`，`#` 开头为注释
    Batch { list: PathBuf },
    /// 打开浏览器通过反爬验证，把会话凭证写入文件
    #[cfg(feature = "chromium")]
    Gate {
        url: String,
        /// 凭证保存路径
        #[arg(short, long, default_value = "credentials.json")]
        save: PathBuf,
        /// 真实页面才有的选择器，出现即视为放行
        #[arg(long)]
        selector: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("读取环境变量配置失败")?;
    if let Some(dir) = &cli.output {
        config.output_dir = dir.clone();
    }

    match cli.command {
        Commands::Fetch { url, title } => {
            let title = title.unwrap_or_else(|| title_from_url(&url));
            let target = DownloadTarget::new(url, title)?;
            let orchestrator = build_orchestrator(&config, cli.cookies.as_deref()).await?;
            let path = orchestrator.run_one(&target).await?;
            println!("已保存: {}", path.display());
        }
        Commands::Batch { list } => {
            let targets = read_target_list(&list).await?;
            if targets.is_empty() {
                bail!("列表为空: {}", list.display());
            }
            let orchestrator = build_orchestrator(&config, cli.cookies.as_deref()).await?;
            let report = orchestrator.run(targets).await;
            println!("{report}");
            println!("输出目录: {}", config.output_dir.display());
            if !report.all_succeeded() {
                std::process::exit(1);
            }
        }
        #[cfg(feature = "chromium")]
        Commands::Gate { url, save, selector } => {
            run_gate(&config, &url, &save, selector).await?;
        }
    }
    Ok(())
}

async fn load_credentials(path: Option<&Path>) -> Result<SessionCredentials> {
    match path {
        Some(p) => {
            let text = tokio::fs::read_to_string(p)
                .await
                .with_context(|| format!("读取凭证文件失败: {}", p.display()))?;
            let credentials: SessionCredentials =
                serde_json::from_str(&text).context("凭证文件格式错误")?;
            info!(cookies = credentials.cookies().len(), fingerprint = %credentials.fingerprint(), "已加载会话凭证");
            Ok(credentials)
        }
        None => Ok(SessionCredentials::anonymous(None)),
    }
}

async fn build_orchestrator(config: &AppConfig, cookies: Option<&Path>) -> Result<TaskOrchestrator> {
    let credentials = Arc::new(load_credentials(cookies).await?);
    let orchestrator = TaskOrchestrator::new(credentials, config.orchestrator_config())
        .with_on_task_progress_hook(|p: &TaskProgress| {
            info!(index = p.index, title = %p.title, mib = p.bytes_received / (1024 * 1024), "下载中");
        });

    let cancel = orchestrator.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("收到中断信号，正在停止，已下载部分会保留");
            cancel.cancel();
        }
    });
    Ok(orchestrator)
}

/// 取 URL 路径最后一段（去掉扩展名）作为标题
fn title_from_url(url: &str) -> String {
    url.split(['?', '#'])
        .next()
        .and_then(|u| u.rsplit('/').next())
        .map(|last| last.rsplit_once('.').map_or(last, |(stem, _)| stem).to_string())
        .unwrap_or_default()
}

async fn read_target_list(path: &Path) -> Result<Vec<DownloadTarget>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("读取列表失败: {}", path.display()))?;
    let mut targets = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (url, title) = match line.split_once(char::is_whitespace) {
            Some((u, t)) => (u.to_string(), t.trim().to_string()),
            None => (line.to_string(), title_from_url(line)),
        };
        let target = DownloadTarget::new(url, title)
            .with_context(|| format!("第 {} 行无效", lineno + 1))?;
        targets.push(target);
    }
    Ok(targets)
}

#[cfg(feature = "chromium")]
async fn run_gate(config: &AppConfig, url: &str, save: &Path, selector: Option<String>) -> Result<()> {
    use h_downloader::browser::{ChromiumOptions, ChromiumSession};
    use h_downloader::gate::{AntiBotGate, StdinConfirmation};

    let session = ChromiumSession::launch(
        ChromiumOptions::new(&config.user_data_dir).headless(config.headless),
    )
    .await?;
    let session = Arc::new(session);

    let mut gate_config = config.gate_config();
    gate_config.real_content_selector = selector;
    let gate = AntiBotGate::new(Arc::clone(&session), gate_config)
        .with_confirmation(StdinConfirmation::default());

    let result = gate.pass(url).await;
    if let Err(e) = session.close().await {
        warn!(error = %e, "关闭浏览器失败");
    }
    let credentials = result?;

    let json = serde_json::to_string_pretty(&credentials)?;
    tokio::fs::write(save, json)
        .await
        .with_context(|| format!("写入凭证失败: {}", save.display()))?;
    println!("凭证已保存: {}（{} 个 Cookie）", save.display(), credentials.cookies().len());
    Ok(())
}
