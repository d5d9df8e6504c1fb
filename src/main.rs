use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use esg_quest::companies::load_companies;
use esg_quest::config::Args;
use esg_quest::engine::{Engine, EngineSettings, InteractionRequest};
use esg_quest::points::SessionStore;

fn init_logging(level: &str) {
    // RUST_LOG wins over --log-level
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("esg_quest={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let companies = load_companies(&args.data, Duration::from_secs(args.fetch_timeout_secs))
        .await
        .with_context(|| format!("Could not load dataset {}", args.data))?;

    let mut store = if args.reset_session {
        info!("[SESSION] Starting a fresh session");
        SessionStore::fresh(&args.session)
    } else {
        SessionStore::load(&args.session)
    };

    let engine = Engine::new(EngineSettings {
        placeholder_image: args.placeholder.clone(),
        daily_challenge: args.daily_challenge,
    });
    let request = InteractionRequest {
        industry: args.industry.clone(),
        portfolio_size: args.size,
        selected: if args.select.is_empty() {
            None
        } else {
            Some(args.select.clone())
        },
    };

    let (view, next_history) = engine.evaluate(
        &companies,
        &request,
        &store.history,
        Local::now().date_naive(),
        &mut rand::thread_rng(),
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", view);
    }

    if view.evaluation.report().is_none() {
        warn!("[SESSION] No portfolio selected - session scores left unchanged");
    }
    store.history = next_history;
    store
        .save()
        .with_context(|| format!("Could not save session to {}", store.path().display()))?;

    Ok(())
}
