use std::path::PathBuf;

use clap::Parser;

/// Nocturne - a terminal music player demo with synced lyrics
#[derive(Parser, Debug)]
#[command(name = "nocturne", version, about)]
pub struct Args {
    /// Read settings from this file instead of the default location
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the default config.toml to stdout and exit
    #[arg(long)]
    pub generate_config: bool,

    /// Run without a terminal UI: play for this many clock ticks, then print
    /// the final snapshot as JSON
    #[arg(long, value_name = "TICKS")]
    pub headless: Option<u32>,

    /// Override the playback clock period from the config file
    #[arg(long, value_name = "MS")]
    pub tick_ms: Option<u64>,

    /// Track id to start on (unknown ids fall back to the first track)
    #[arg(long, short = 't', value_name = "ID")]
    pub track: Option<String>,
}
