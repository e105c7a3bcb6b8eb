use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Ranking key: PRICE, VOL, MCAP, LIQ, TXNS or HOLDER
    #[arg(short, long, default_value = "MCAP")]
    pub sort: String,

    /// Seed list (record array or discovery payload); overrides SEED_PATH
    #[arg(long)]
    pub seed: Option<PathBuf>,

    /// Rows to print per refresh
    #[arg(short, long, default_value_t = 10)]
    pub top: usize,

    /// Platform metrics snapshot to print at startup
    #[arg(long)]
    pub metrics: Option<PathBuf>,

    /// Mark a token as watched (repeatable)
    #[arg(short, long = "watch", value_name = "MINT")]
    pub watch: Vec<String>,

    /// Only print tokens matching this text
    #[arg(long)]
    pub search: Option<String>,

    /// Stop after the first refresh
    #[arg(long)]
    pub once: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the top holders of a token
    Holders {
        mint: String,
        #[arg(long, default_value_t = 30)]
        limit: usize,
    },
    /// Show the tracked part of a wallet
    Portfolio { wallet: String },
    /// Print the discovery lists once
    Discover,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["tracker"]);
        assert_eq!(args.sort, "MCAP");
        assert_eq!(args.top, 10);
        assert!(args.command.is_none());
        assert!(!args.once);
    }

    #[test]
    fn test_subcommand_and_flags() {
        let args = Args::parse_from([
            "tracker", "--sort", "vol", "-w", "MintA", "-w", "MintB", "holders", "MintX", "--limit", "5",
        ]);
        assert_eq!(args.sort, "vol");
        assert_eq!(args.watch, vec!["MintA", "MintB"]);
        assert!(matches!(
            args.command,
            Some(Command::Holders { ref mint, limit: 5 }) if mint == "MintX"
        ));
    }
}
