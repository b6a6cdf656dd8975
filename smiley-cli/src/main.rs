//! smiley CLI
//!
//! Command-line access to a smileycoin daemon's JSON-RPC interface.
//!
//! # Usage
//!
//! ```bash
//! # Daemon state
//! smiley --rpc-user smileyrpc --rpc-password secret info
//!
//! # Any RPC method, params parsed as JSON where possible
//! smiley call getblockhash 1000
//!
//! # Launch smileycoind first if it is not running, and leave it up
//! smiley --start-server --keep-running block-count
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use smiley_client::SmileyClient;
use tracing_subscriber::{EnvFilter, fmt};

mod client;

#[derive(Parser)]
#[command(name = "smiley")]
#[command(about = "Talk to a smileycoin daemon over JSON-RPC")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    connection: client::ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Call any RPC method with positional params
    Call {
        /// Method name (e.g. getblockhash)
        method: String,

        /// Params, each parsed as JSON or taken as a string
        params: Vec<String>,
    },

    /// Show general daemon state
    Info,

    /// Show the number of blocks in the longest chain
    BlockCount,

    /// Show the wallet balance
    Balance {
        /// Only this account
        #[arg(short, long)]
        account: Option<String>,

        /// Minimum confirmations
        #[arg(short, long)]
        minconf: Option<u32>,
    },

    /// Create a new receiving address
    NewAddress {
        /// Account to assign the address to
        #[arg(short, long)]
        account: Option<String>,
    },

    /// Send coins to an address
    Send {
        /// Destination address
        address: String,

        /// Amount in SMLY
        amount: f64,

        /// Comment stored with the transaction
        #[arg(short, long)]
        comment: Option<String>,
    },

    /// Check whether an address is valid
    Validate {
        /// Address to check
        address: String,
    },

    /// List registered ledger services
    Services,

    /// List the coupons of a coupon sales service
    Coupons {
        /// Service address
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let client = client::connect(&cli.connection)?;
    let output = run(&client, cli.command).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(client: &SmileyClient, command: Commands) -> Result<Value> {
    let output = match command {
        Commands::Call { method, params } => {
            let params = params.iter().map(|p| client::parse_param(p)).collect();
            client.call(&method, params).await?
        }
        Commands::Info => client.get_info().await?,
        Commands::BlockCount => json!(client.get_block_count().await?),
        Commands::Balance { account, minconf } => {
            json!(client.get_balance(account.as_deref(), minconf).await?)
        }
        Commands::NewAddress { account } => {
            json!(client.get_new_address(account.as_deref(), None).await?)
        }
        Commands::Send {
            address,
            amount,
            comment,
        } => json!(
            client
                .send_to_address(&address, amount, comment.as_deref(), None)
                .await?
        ),
        Commands::Validate { address } => {
            serde_json::to_value(client.validate_address(&address).await?)?
        }
        Commands::Services => client.get_service_addresses().await?,
        Commands::Coupons { address } => client.get_coupon_list(&address).await?,
    };
    Ok(output)
}
