//! wisp-wallet: submit and inspect offline-finalized transaction artifacts.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde_json::json;
use wisp_relay::{Dispatcher, RelayMode, TcpPeer, TxPeer};
use wisp_store::{FileStore, SubmissionStore};
use wisp_types::NetworkId;
use wisp_validation::{ChainView, FixedChainView, NullChainView, Validator};
use wisp_wallet::{init_logging, SubmitError, SubmitOutcome, Submitter};

#[derive(Parser)]
#[command(name = "wisp-wallet", version, about = "wisp wallet transaction submission")]
struct Cli {
    /// Network this node is on: "main", "test", or "dev".
    #[arg(long, default_value = "main", env = "WISP_NETWORK")]
    network: NetworkId,

    /// Directory holding the submission log.
    #[arg(long, default_value = "./wisp_data", env = "WISP_STORE_DIR")]
    store_dir: PathBuf,

    /// Peer addresses (comma-separated: "1.2.3.4:7414,5.6.7.8:7414").
    #[arg(long, env = "WISP_PEERS", value_delimiter = ',')]
    peers: Vec<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "WISP_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as newline-delimited JSON instead of human-readable lines.
    #[arg(long, env = "WISP_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Decode, validate and broadcast an artifact file.
    Submit {
        /// Path to the artifact file.
        #[arg(short, long)]
        input: PathBuf,

        /// Broadcast to all peers immediately instead of stem relay.
        #[arg(short, long)]
        fluff: bool,

        /// Current chain tip height, for height-locked kernels. Without it,
        /// height-locked artifacts fail validation.
        #[arg(long)]
        chain_height: Option<u64>,
    },
    /// Decode an artifact file and print a summary without broadcasting.
    Inspect {
        /// Path to the artifact file.
        #[arg(short, long)]
        input: PathBuf,

        /// Current chain tip height, for height-locked kernels.
        #[arg(long)]
        chain_height: Option<u64>,
    },
}

fn chain_view(height: Option<u64>) -> Arc<dyn ChainView> {
    match height {
        Some(h) => Arc::new(FixedChainView(h)),
        None => Arc::new(NullChainView),
    }
}

async fn run_submit(
    cli: &Cli,
    input: &PathBuf,
    fluff: bool,
    chain_height: Option<u64>,
) -> Result<SubmitOutcome, SubmitError> {
    let store = FileStore::open(&cli.store_dir)
        .map_err(SubmitError::Store)?;
    let validator = Validator::new(cli.network, chain_view(chain_height));
    let peers: Vec<Arc<dyn TxPeer>> = cli
        .peers
        .iter()
        .map(|addr| Arc::new(TcpPeer::new(addr.clone())) as Arc<dyn TxPeer>)
        .collect();
    let dispatcher = Dispatcher::with_default_timeout(peers);

    let submitter = Submitter::new(Arc::new(store) as Arc<dyn SubmissionStore>, validator, dispatcher);
    let mode = if fluff { RelayMode::Fluff } else { RelayMode::Stem };
    submitter.submit_file(input, mode).await
}

fn run_inspect(cli: &Cli, input: &PathBuf, chain_height: Option<u64>) -> Result<(), SubmitError> {
    let bytes = std::fs::read(input).map_err(|source| SubmitError::Io {
        path: input.clone(),
        source,
    })?;
    let artifact = wisp_artifact::decode(&bytes)?;

    let validator = Validator::new(cli.network, chain_view(chain_height));
    let validation: Result<(), _> = validator.validate(&artifact);

    let summary = json!({
        "id": artifact.id.to_string(),
        "network": artifact.network.as_str(),
        "inputs": artifact.tx.inputs.len(),
        "outputs": artifact.tx.outputs.len(),
        "kernels": artifact.tx.kernels.len(),
        "fee": artifact.tx.total_fee(),
        "max_lock_height": artifact.tx.max_lock_height(),
        "valid": validation.is_ok(),
        "validation_error": validation.as_ref().err().map(|e| e.to_string()),
    });
    println!("{}", serde_json::to_string_pretty(&summary).unwrap_or_default());

    validation.map_err(SubmitError::Validation)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.log_json);

    let result = match &cli.command {
        Command::Submit {
            input,
            fluff,
            chain_height,
        } => match run_submit(&cli, input, *fluff, *chain_height).await {
            Ok(SubmitOutcome::Accepted(record)) => {
                println!("accepted: {}", record.artifact_id);
                Ok(())
            }
            Ok(SubmitOutcome::AlreadyAccepted(record)) => {
                println!(
                    "already accepted: {} (first accepted at {})",
                    record.artifact_id,
                    record.attempted_at.as_secs()
                );
                Ok(())
            }
            Err(e) => Err(e),
        },
        Command::Inspect {
            input,
            chain_height,
        } => run_inspect(&cli, input, *chain_height),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}
