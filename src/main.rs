//! Fake News Scanner: command-line front end.
//! Scores articles, keeps the run's reports in memory, and prints JSON to stdout.
//! Logs go to stderr (`RUST_LOG` / `FAKENEWS_LOG` control the filter).

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fakenews_scanner::{
    samples, Analysis, FeedbackKind, Indicator, ScannerConfig, Session, Stats,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Scanner config (TOML); overrides FAKENEWS_CONFIG_PATH.
    #[arg(global = true, short, long)]
    config: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one article.
    Analyze {
        #[arg(short, long)]
        title: String,
        #[arg(short = 'b', long)]
        content: String,
        /// Score even if title or content is blank.
        #[arg(long, default_value_t = false)]
        skip_validation: bool,
    },
    /// Score one of the built-in sample articles (1-3).
    Sample { number: usize },
    /// List the built-in sample articles.
    Samples,
    /// Score every sample in one session and print stats and history.
    Demo,
}

/// Compact stderr logging; defaults to info for this crate, warn elsewhere.
fn init_tracing() {
    let filter = std::env::var("FAKENEWS_LOG")
        .ok()
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("fakenews_scanner=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[derive(Serialize)]
struct AnalyzeOut<'a> {
    headline: &'static str,
    #[serde(flatten)]
    analysis: &'a Analysis,
    indicators: Vec<Indicator>,
}

impl<'a> AnalyzeOut<'a> {
    fn new(analysis: &'a Analysis) -> Self {
        Self {
            headline: analysis.result.label.headline(),
            analysis,
            indicators: analysis.result.indicators(),
        }
    }
}

#[derive(Serialize)]
struct HistoryRow {
    id: String,
    title: String,
    prediction: String,
    confidence: u8,
    timestamp: String,
}

#[derive(Serialize)]
struct DemoOut<'a> {
    analyses: Vec<AnalyzeOut<'a>>,
    stats: Stats,
    distribution: Option<fakenews_scanner::store::Distribution>,
    history: Vec<HistoryRow>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let config = ScannerConfig::load(cli.config.as_deref().map(std::path::Path::new))?;
    let session = Session::new(config);

    match cli.command {
        Commands::Analyze {
            title,
            content,
            skip_validation,
        } => {
            let analysis = if skip_validation {
                session.analyze(&title, &content)
            } else {
                session.analyze_checked(&title, &content)?
            };
            print_json(&AnalyzeOut::new(&analysis))?;
        }
        Commands::Sample { number } => {
            let s = samples::sample(number)
                .ok_or_else(|| anyhow!("no sample #{number} (expected 1-{})", samples::SAMPLES.len()))?;
            let analysis = session.analyze(s.title, s.content);
            print_json(&AnalyzeOut::new(&analysis))?;
        }
        Commands::Samples => print_json(&samples::SAMPLES)?,
        Commands::Demo => {
            let analyses: Vec<Analysis> = samples::SAMPLES
                .iter()
                .map(|s| session.analyze(s.title, s.content))
                .collect();
            if let Some(first) = analyses.first() {
                session.feedback(&first.id, FeedbackKind::Correct);
            }

            let preview = session.config().store.title_preview;
            let history: Vec<HistoryRow> = session
                .history()
                .into_iter()
                .map(|r| HistoryRow {
                    id: r.id.to_string(),
                    title: r.title_preview(preview),
                    prediction: r.prediction.to_string(),
                    confidence: r.confidence,
                    timestamp: r.timestamp_display(),
                })
                .collect();
            let stats = session.stats();
            print_json(&DemoOut {
                analyses: analyses.iter().map(AnalyzeOut::new).collect(),
                stats,
                distribution: stats.distribution(),
                history,
            })?;
        }
    }

    Ok(())
}
