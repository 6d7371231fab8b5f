//! Command-line configuration

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "pdf-recolor")]
#[command(version, about = "Put a solid background color under every page of a PDF")]
pub struct Args {
    /// Input PDF; prompts interactively when omitted
    pub input: Option<PathBuf>,

    /// Red channel (0-255)
    #[arg(long, allow_hyphen_values = true)]
    pub red: Option<String>,

    /// Green channel (0-255)
    #[arg(long, allow_hyphen_values = true)]
    pub green: Option<String>,

    /// Blue channel (0-255)
    #[arg(long, allow_hyphen_values = true)]
    pub blue: Option<String>,

    /// Color as hex, e.g. "#C8DCFF"
    #[arg(long, conflicts_with_all = ["red", "green", "blue"])]
    pub hex: Option<String>,

    /// Output path [default: <input>_colored.pdf next to the input]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a JSON run report after a successful run
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
