//! revenue-runner: batch report and dashboard for account churn risk.
//!
//! Usage:
//!   revenue-runner --seed 42 --accounts 200 --csv report.csv --chart chart.svg
//!   revenue-runner --config revenue.json --json
//!   revenue-runner --dashboard --filter watchlist

mod dashboard;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use revenue_core::{
    chart::{BarChart, CHART_TITLE},
    config::EngineConfig,
    engine::{Portfolio, RevenueEngine},
    export,
    report::{format_breakdown, format_summary, format_top_table},
    summary::{PortfolioSummary, TierFilter, TierTotal},
};
use std::env;
use std::fs::File;

const DASHBOARD_LOG: &str = "revenue-runner.log";

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    seed: u64,
    summary: &'a PortfolioSummary,
    breakdown: Vec<TierTotal>,
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let dashboard_mode = args.iter().any(|a| a == "--dashboard");
    let json_mode = args.iter().any(|a| a == "--json");

    init_logging(dashboard_mode)?;

    let mut config = match string_arg(&args, "--config") {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {path}"))?,
        None => EngineConfig::default(),
    };
    config.generator.seed = parse_arg(&args, "--seed", config.generator.seed);
    config.generator.num_accounts = parse_arg(&args, "--accounts", config.generator.num_accounts);
    config.report.top_n = parse_arg(&args, "--top", config.report.top_n);
    if let Some(path) = string_arg(&args, "--csv") {
        config.report.csv_path = path.to_string();
    }
    if let Some(path) = string_arg(&args, "--chart") {
        config.report.chart_path = path.to_string();
    }

    let initial_filter = string_arg(&args, "--filter")
        .map(str::parse::<TierFilter>)
        .transpose()?
        .unwrap_or_default();

    let engine = RevenueEngine::build(config)?;
    let portfolio = engine.run();

    if dashboard_mode {
        return dashboard::run(engine, portfolio, initial_filter);
    }
    if json_mode {
        return print_json(&engine, &portfolio);
    }
    run_batch(&engine, &portfolio)
}

/// In dashboard mode stderr belongs to the terminal UI, so records go to a file.
fn init_logging(dashboard_mode: bool) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if dashboard_mode {
        let file = File::create(DASHBOARD_LOG)
            .with_context(|| format!("creating {DASHBOARD_LOG}"))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run_batch(engine: &RevenueEngine, portfolio: &Portfolio) -> Result<()> {
    let config = &engine.config;

    println!("Revenue Intelligence: batch report");
    println!("  generated: {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  seed:      {}", config.generator.seed);
    println!("  accounts:  {}", config.generator.num_accounts);
    println!();

    print!("{}", format_summary(&portfolio.summary));
    println!();

    let title = format!("TOP {} REVENUE RISK ACCOUNTS", config.report.top_n);
    print!("{}", format_top_table(&title, &portfolio.top(config.report.top_n)));
    println!();

    let breakdown = portfolio.breakdown();
    print!("{}", format_breakdown(&breakdown));
    println!();

    let chart = BarChart {
        title:  CHART_TITLE,
        width:  config.report.chart_width,
        height: config.report.chart_height,
    };
    chart
        .save_svg(&config.report.chart_path, &breakdown)
        .with_context(|| format!("writing chart to {}", config.report.chart_path))?;
    println!("Chart saved to {}", config.report.chart_path);

    export::export_csv(&config.report.csv_path, &portfolio.accounts)
        .with_context(|| format!("writing report to {}", config.report.csv_path))?;
    println!("Report exported to {}", config.report.csv_path);

    Ok(())
}

fn print_json(engine: &RevenueEngine, portfolio: &Portfolio) -> Result<()> {
    let report = JsonReport {
        generated_at: Utc::now(),
        seed: engine.config.generator.seed,
        summary: &portfolio.summary,
        breakdown: portfolio.breakdown(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
