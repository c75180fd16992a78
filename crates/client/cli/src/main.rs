//! Terminal driver that plays a scripted encounter against the runtime.
mod config;
mod printer;
mod script;

use std::sync::Arc;

use anyhow::Result;
use combat_core::OperationContext;
use runtime::{OperatorId, Runtime, Topic, snapshot};

use config::CliConfig;
use script::{Operator, RoundSummary};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();
    let config = CliConfig::from_env();
    tracing::info!(target: "encounter_cli", ?config, "starting encounter");

    let runtime = Runtime::builder()
        .config(config.runtime.clone())
        .add_hook(Arc::new(RoundSummary))
        .build()
        .await?;
    let handle = runtime.handle();

    let printers = [Topic::Phase, Topic::Turn, Topic::Relay]
        .map(|topic| printer::spawn(handle.subscribe(topic)));

    let mut operator = Operator::connect(&handle, OperatorId(1)).await?;
    let participant = OperationContext::new(config.operator);
    script::play(&handle, &mut operator, participant, config.rounds).await?;
    operator.disconnect(&handle).await?;

    if config.dump_state {
        let state = handle.query_state().await?;
        println!("{}", snapshot::encode_pretty(&state)?);
    }

    drop(handle);
    runtime.shutdown().await?;
    for printer in printers {
        printer.await?;
    }
    Ok(())
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
