use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use cle_tech_scraper::app::ports::HttpClientPort;
use cle_tech_scraper::config::Config;
use cle_tech_scraper::constants::DEFAULT_CONFIG_PATH;
use cle_tech_scraper::crawler::{format_email_for_display, EmailCrawler};
use cle_tech_scraper::infra::ReqwestHttp;
use cle_tech_scraper::summary::summarize_trends;
use cle_tech_scraper::{logging, metrics, parse_industry_trend_csv};

#[derive(Parser)]
#[command(name = "cle_tech_scraper")]
#[command(about = "Cleveland tech dashboard data tools: trend CSV parsing and contact email discovery")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the industry trend CSV and print it as JSON
    Trends {
        /// URL or file path of the CSV (defaults to trends.source from config)
        #[arg(long)]
        source: Option<String>,
        /// Print earliest-vs-latest summaries instead of the raw data points
        #[arg(long)]
        summary: bool,
    },
    /// Crawl a website for contact email addresses
    Emails {
        /// Start URL, usually the organization's homepage
        #[arg(long)]
        url: String,
        /// Maximum number of pages to fetch (defaults to crawler.pages_limit from config)
        #[arg(long)]
        pages: Option<usize>,
        /// Print one readable line per address instead of JSON
        #[arg(long)]
        display: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load_from(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config))?;
    metrics::init_metrics();

    let http: Arc<dyn HttpClientPort> =
        Arc::new(ReqwestHttp::new(&config.crawler).context("building HTTP client")?);

    match cli.command {
        Commands::Trends { source, summary } => {
            let source = source.unwrap_or_else(|| config.trends.source.clone());
            info!("Loading industry trends from {}", source);

            let dataset = parse_industry_trend_csv(http.as_ref(), &source).await;
            let json = if summary {
                serde_json::to_string_pretty(&summarize_trends(&dataset))?
            } else {
                serde_json::to_string_pretty(&dataset)?
            };
            println!("{}", json);
        }
        Commands::Emails { url, pages, display } => {
            let pages_limit = pages.unwrap_or(config.crawler.pages_limit);
            anyhow::ensure!(pages_limit > 0, "--pages must be at least 1");

            let crawler = EmailCrawler::new(http).with_pages_limit(pages_limit);
            let found = crawler.crawl(&url).await;

            if display {
                for hit in &found {
                    println!(
                        "{} ({}) - {}",
                        hit.email,
                        format_email_for_display(&hit.email),
                        hit.page
                    );
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&found)?);
            }
        }
    }
    Ok(())
}
