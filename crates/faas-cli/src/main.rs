//! Function invocation CLI
//!
//! Invokes a named gateway-hosted function once and prints the decoded
//! JSON result.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use faas_client::{ClientConfig, FunctionClient, Payload};
use faas_protocol::LogType;

#[derive(Parser, Debug)]
#[command(name = "faas-invoke")]
#[command(about = "Invoke a gateway-hosted function synchronously")]
struct Args {
    /// Function name
    function: String,

    /// JSON payload (or a pre-serialized string with --raw)
    #[arg(default_value = "{}")]
    payload: String,

    /// Pass the payload through byte-for-byte instead of parsing it
    #[arg(long)]
    raw: bool,

    /// Gateway endpoint
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    endpoint: String,

    /// Request timeout in milliseconds
    #[arg(long, default_value = "30000")]
    timeout_ms: u64,

    /// Capture the execution log tail
    #[arg(long)]
    tail: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("faas_invoke=info".parse()?))
        .init();

    let args = Args::parse();

    let config = ClientConfig {
        endpoint: args.endpoint.clone(),
        timeout: Duration::from_millis(args.timeout_ms),
        log_type: if args.tail { LogType::Tail } else { LogType::None },
    };
    let client = FunctionClient::new(&config)?;

    info!("Invoking {} via {}", args.function, args.endpoint);

    let payload = if args.raw {
        Payload::Raw(args.payload.clone())
    } else {
        let value: Value = serde_json::from_str(&args.payload)
            .context("payload is not valid JSON (use --raw to send it verbatim)")?;
        Payload::Structured(value)
    };

    let result: Value = client.invoke(&args.function, payload).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
