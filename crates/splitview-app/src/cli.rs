use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// splitview: the split view engine behind the browser extension.
#[derive(Parser, Debug)]
#[command(name = "splitview", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (debug, info, warn, error) or a full filter directive.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Chrome on Windows passes the calling window's handle.
    #[arg(long, hide = true)]
    pub parent_window: Option<i64>,

    /// What the browser passes when it launches a native host: the caller
    /// origin, or the manifest path and extension id.
    #[arg(hide = true)]
    pub caller: Vec<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Run as the browser's native messaging host (the default).
    Serve,
    /// Resolve URLs and print their framing verdicts as JSON.
    Probe {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Print the window rectangles for N panels side by side.
    Plan {
        n: usize,
        /// Display size as WIDTHxHEIGHT.
        #[arg(value_parser = parse_size)]
        size: (u32, u32),
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        left: i32,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        top: i32,
    },
    /// Print the effective config as JSON.
    Config,
}

fn parse_size(raw: &str) -> Result<(u32, u32), String> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{raw}'"))?;
    let width = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let height = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok((width, height))
}

pub fn parse() -> Args {
    Args::parse()
}
