use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use client::ContentLoader;
use configs::AppConfig;
use models::{Category, CategoryKind};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Read and publish portal content through the fallback chain")]
struct Args {
    /// Remote portal base URL, overrides CONTENT_REMOTE_URL
    #[arg(long)]
    remote: Option<String>,

    /// Local cache directory, overrides CONTENT_CACHE_DIR
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Admin session token for remote writes
    #[arg(long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a category from the first tier that has it
    Fetch { category: Category },
    /// Publish a JSON file as the new content of a category
    Push { category: Category, file: PathBuf },
    /// Score six 1-5 maturity ratings
    Assess {
        #[arg(num_args = 6, required = true)]
        ratings: Vec<u8>,
    },
    /// List the pathfinder units
    Units,
}

fn load_config(args: &Args) -> AppConfig {
    let mut cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            // 客户端不需要服务端密钥，校验失败时仍沿用文件与环境变量
            warn!(error = %e, "config did not validate, using it unchecked");
            let mut cfg = configs::load_default().unwrap_or_default();
            if let Err(e) = cfg.apply_env(|key| std::env::var(key).ok()) {
                warn!(error = %e, "ignoring invalid environment overrides");
            }
            cfg
        }
    };
    if let Some(url) = &args.remote {
        cfg.remote.base_url = Some(url.trim_end_matches('/').to_string());
    }
    if let Some(dir) = &args.cache_dir {
        cfg.remote.cache_dir = dir.clone();
    }
    cfg
}

/// Reject a file whose top-level shape cannot be the content of `category`.
fn check_shape(category: Category, data: &serde_json::Value) -> anyhow::Result<()> {
    let ok = match category.kind() {
        CategoryKind::Collection => data.is_array(),
        // mail-config 允许 null，表示清除
        CategoryKind::Singleton => data.is_object() || (category == Category::MailConfig && data.is_null()),
    };
    if !ok {
        anyhow::bail!("{category} expects a JSON {}", match category.kind() {
            CategoryKind::Collection => "array",
            CategoryKind::Singleton => "object",
        });
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();
    let args = Args::parse();

    match &args.command {
        Command::Fetch { category } => {
            let cfg = load_config(&args);
            let loader = ContentLoader::from_config(&cfg, args.token.clone()).await?;
            let out = loader.load(*category).await?;
            info!(%category, tier = %out.tier, "fetched");
            print_json(&out.data)?;
        }
        Command::Push { category, file } => {
            let cfg = load_config(&args);
            let raw = tokio::fs::read(file).await.with_context(|| format!("read {}", file.display()))?;
            let data: serde_json::Value = serde_json::from_slice(&raw).context("file is not valid JSON")?;
            check_shape(*category, &data)?;
            let loader = ContentLoader::from_config(&cfg, args.token.clone()).await?;
            let report = loader.save(*category, &data).await;
            print_json(&report)?;
            if !report.cache && !report.key_value {
                anyhow::bail!("no tier accepted the write");
            }
        }
        Command::Assess { ratings } => {
            let result = service::assessment::score(ratings)?;
            print_json(&result)?;
        }
        Command::Units => print_json(&models::pathfinder::all())?,
    }
    Ok(())
}
