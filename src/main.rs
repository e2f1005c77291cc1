use clap::Parser;
use imgqc_common::{plan_folder, RunPlan, Session, Staging};
use imgqc_rust::{classifier, cli, config, error, export, orchestrator, report, scanner};
use cli::{Cli, Commands};
use config::Config;
use error::{ImgQcError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "imgqc=debug,imgqc_rust=debug" } else { "imgqc=info,imgqc_rust=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Run { files, folder, recursive, endpoint, output, format, yes } => {
            println!("🚀 imgqc - 品質判定\n");

            // 1. 読み込み
            println!("[1/3] 画像を読み込み中...");
            let mut staging = Staging::new();
            if !files.is_empty() {
                let added = staging.add_selected(scanner::load_files(&files)?)?;
                println!("✔ 個別選択: {}件", added);
            }
            if let Some(folder) = &folder {
                let images = scanner::scan_folder(folder, recursive)?;
                if images.is_empty() && files.is_empty() {
                    return Err(ImgQcError::NoImagesFound(folder.display().to_string()));
                }
                let added = staging.add_folder(scanner::load_images(&images)?);
                println!("✔ フォルダ: {}件", added);
            }
            println!();

            // 2. 計画
            println!("[2/3] バッチを作成中...");
            let plan = orchestrator::prepare(staging)?;
            report::print_plan(&plan);
            println!();

            if !yes {
                let proceed = dialoguer::Confirm::new()
                    .with_prompt(format!("{}バッチを送信しますか?", plan.batch_count()))
                    .default(true)
                    .interact()
                    .map_err(|e| ImgQcError::Prompt(e.to_string()))?;
                if !proceed {
                    return Err(ImgQcError::Cancelled);
                }
            }

            // 3. 送信
            let endpoint = endpoint.unwrap_or_else(|| config.endpoint());
            println!("[3/3] 送信中... ({})", endpoint);
            let classifier = classifier::HttpClassifier::new(
                endpoint.clone(),
                config.timeout_seconds.map(Duration::from_secs),
            )?;

            let progress = ProgressBar::new(plan.batch_count() as u64);
            progress.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                    .map_err(|e| ImgQcError::Config(e.to_string()))?
                    .progress_chars("=>-"),
            );

            let result = orchestrator::execute(&classifier, Session::new(), plan, &progress).await;
            println!("✔ {}バッチ送信完了\n", result.submitted);

            report::print_report(&result);

            if let Some(output) = output {
                println!();
                let doc = report::ReportDocument::from_run(&result, classifier.endpoint());
                export::export_report(&doc, format, &output)?;
            }

            println!("\n✅ 完了");
        }

        Commands::Plan { folder, recursive } => {
            println!("📋 imgqc - バッチ計画\n");

            let images = scanner::scan_folder(&folder, recursive)?;
            if images.is_empty() {
                return Err(ImgQcError::NoImagesFound(folder.display().to_string()));
            }
            println!("✔ {}枚の画像を検出\n", images.len());

            let plan = RunPlan {
                folder: plan_folder(scanner::load_images(&images)?),
                ..Default::default()
            };
            report::print_plan(&plan);
        }

        Commands::Config { set_endpoint, set_timeout, show } => {
            let mut config = config;

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                println!("✔ エンドポイントを設定しました");
            }

            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
                println!("✔ タイムアウトを設定しました");
            }

            if show {
                println!("設定:");
                println!("  エンドポイント: {}", config.endpoint());
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: なし"),
                }
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
