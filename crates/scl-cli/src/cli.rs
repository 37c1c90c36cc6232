use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "scltd",
    about = "SCL type diff — compare specified and instantiated logical-node types",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with diff settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two LNodeTypes
    Compare(CompareArgs),
    /// Compare every linked LNode against its IED logical node
    Lnodes(LnodesArgs),
    /// List the LNodeTypes of a file
    Types(TypesArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// SCL file holding the specified type
    pub file: PathBuf,
    /// Id of the specified LNodeType
    pub ours: String,
    /// Id of the instantiated LNodeType
    pub theirs: String,
    /// SCL file holding the instantiated type (defaults to FILE)
    #[arg(long)]
    pub theirs_file: Option<PathBuf>,
    /// Hide members that match
    #[arg(short = 'd', long)]
    pub only_differences: bool,
}

#[derive(Args)]
pub struct LnodesArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct TypesArgs {
    pub file: PathBuf,
}
