//! SimpleApp CLI - run the contract locally against a world state file

use clap::{Parser, Subcommand};
use simpleapp_chaincode::{commands, AppConfig, Harness, WorldStateFile};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simpleapp")]
#[command(about = "SimpleApp - asset ledger chaincode harness", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// World state file (overrides state.path)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Caller certificate (overrides identity.cert_path)
    #[arg(long, global = true)]
    cert: Option<PathBuf>,

    /// Caller MSP id (overrides identity.msp_id)
    #[arg(long, global = true)]
    msp_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Self-sign a certificate for a new identity
    Enroll {
        /// Subject common name
        common_name: String,
        /// Certificate output path
        #[arg(long)]
        out: PathBuf,
        /// Private key output path
        #[arg(long)]
        key_out: Option<PathBuf>,
    },

    /// Run init; the caller becomes the admin
    Init,

    /// Run an operation
    Invoke {
        /// Operation name, e.g. create_account
        function: String,
        /// Positional arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print the world state
    Dump,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(state) = cli.state {
        config.state.path = state;
    }
    if let Some(cert) = cli.cert {
        config.identity.cert_path = Some(cert);
    }
    if let Some(msp_id) = cli.msp_id {
        config.identity.msp_id = msp_id;
    }
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let harness = Harness::from_config(&config);

    match cli.command {
        Commands::Enroll {
            common_name,
            out,
            key_out,
        } => {
            commands::enroll(&common_name, &out, key_out.as_deref())?;
            println!("Enrolled \"{}\" -> {}", common_name, out.display());
        }

        Commands::Init => {
            harness.init()?;
            println!("Initialized");
        }

        Commands::Invoke { function, args } => {
            if let Some(payload) = harness.invoke(&function, args)? {
                println!("{}", String::from_utf8_lossy(&payload));
            }
        }

        Commands::Dump => {
            dump(&harness.state, harness.dump()?);
        }
    }

    Ok(())
}

fn dump(file: &WorldStateFile, state: std::collections::BTreeMap<String, Vec<u8>>) {
    if state.is_empty() {
        println!("{} is empty", file.path().display());
        return;
    }
    for (key, value) in state {
        println!("{} = {}", key, String::from_utf8_lossy(&value));
    }
}
