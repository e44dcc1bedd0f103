use clap::Parser;
use std::path::PathBuf;

#[must_use]
pub fn args_checks() -> Args {
    Args::parse()
}

#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file; `config.secret.json` is preferred over this when present
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    pub config: PathBuf,

    /// Directory holding per-race snapshots
    #[arg(long, value_name = "DIR", default_value = "cache")]
    pub cache_dir: PathBuf,

    /// Directory the per-team row files are written under
    #[arg(long, value_name = "DIR", default_value = "results")]
    pub results_dir: PathBuf,

    /// Refetch every race even when a snapshot exists
    #[arg(long)]
    pub force_refresh: bool,

    /// Oldest race id to process (the loop walks from the latest down)
    #[arg(long, value_name = "ID", default_value_t = 1)]
    pub oldest_race: i32,
}
