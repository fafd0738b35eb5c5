use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cuvee_client::DEFAULT_URL;

#[derive(Parser)]
#[command(
    name = "cuvee",
    about = "Cuvee — wine-label provenance on a hash-addressed ledger",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// REST endpoint of the ledger node
    #[arg(long, global = true, default_value = DEFAULT_URL)]
    pub url: String,

    /// File containing the signer's private key seed
    #[arg(long, global = true)]
    pub keyfile: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create or overwrite a wine label record
    Set(SetArgs),
    /// Tombstone a wine label record
    Delete(DeleteArgs),
    /// List every record under the family namespace
    List,
    /// Show a single record by id
    Show(ShowArgs),
}

#[derive(Args)]
pub struct SetArgs {
    /// Label id
    pub id: String,
    /// Printing location
    pub printed_at: String,
    /// Longitude of the printing site
    #[arg(allow_hyphen_values = true)]
    pub longitude: String,
    /// Latitude of the printing site
    #[arg(allow_hyphen_values = true)]
    pub latitude: String,
    /// Seconds to wait for the batch to commit (0 = fire and forget)
    #[arg(long, default_value = "0")]
    pub wait: u64,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Label id
    pub id: String,
    /// Seconds to wait for the batch to commit (0 = fire and forget)
    #[arg(long, default_value = "0")]
    pub wait: u64,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Label id
    pub id: String,
}
