//! IronScan 命令行入口
//!
//! 用法：`ironscan <ADDRESS> [--json]`

use std::sync::Arc;

use anyhow::{Context, Result};
use ironscan::{
    config::Config,
    domain::LookupOutcome,
    infrastructure::logging,
    service::{LookupOrchestrator, TronscanClient},
};

struct CliArgs {
    address: String,
    json: bool,
}

fn parse_args() -> CliArgs {
    let mut address = String::new();
    let mut json = false;

    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else if address.is_empty() {
            address = arg;
        }
    }

    CliArgs { address, json }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 加载环境变量
    dotenvy::dotenv().ok();

    // 2. 加载配置（CONFIG_PATH 指定的文件优先）
    let (config, source) = Config::load(std::env::var("CONFIG_PATH").ok())
        .context("Failed to load configuration")?;
    config.validate()?;

    // 3. 初始化日志（之后再报告配置来源）
    if let Err(e) = logging::init_logging(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }
    source.log();

    let args = parse_args();
    tracing::info!(base_url = %config.explorer.base_url, "Starting IronScan lookup");

    // 4. 执行查询
    let client = TronscanClient::new(&config.explorer)?;
    let orchestrator = LookupOrchestrator::new(Arc::new(client));
    let outcome = orchestrator.perform_lookup(&args.address).await;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?
        );
    } else {
        print_summary(&outcome);
    }

    tracing::debug!(metrics = %ironscan::metrics::render_prometheus(), "Process metrics");

    if let LookupOutcome::Failure(_) = outcome {
        std::process::exit(1);
    }
    Ok(())
}

fn print_summary(outcome: &LookupOutcome) {
    match outcome {
        LookupOutcome::Success(report) => {
            let m = &report.metrics;
            println!("{}", report.scan_status);
            println!("Address:       {}", report.address);
            println!("Network:       {}", report.network);
            println!("Balance:       {}", m.balance);
            println!("USD Value:     {}", m.usd_value);
            println!(
                "Security:      {} ({}/100)",
                report.security.status.display_label(),
                report.security.score
            );
            println!("Transactions:  {}", m.total_transactions);
            println!("Last Active:   {}", m.last_active);
            println!("Address Type:  {}", m.tier);
            println!("Tokens:        {}", m.token_count);
            println!("Scan Time:     {}", m.scan_time);
            if report.is_synthetic() {
                println!("NOTE: explorer unavailable, values above are MOCK DATA");
            }
        }
        LookupOutcome::Failure(failure) => {
            eprintln!("Error: {}", failure.message);
        }
    }
}
