//! PDF Recolor Binary

use clap::Parser;
use recolor_cli::{run_interactive, run_with_args, Args, Outcome, Prompt};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the prompt and results
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::debug!("Starting pdf-recolor v{}", env!("CARGO_PKG_VERSION"));

    let outcome = match args.input.as_deref() {
        Some(input) => run_with_args(input, &args, &mut io::stdout().lock())?,
        None => {
            let mut prompt = Prompt::new(io::stdin().lock(), io::stdout().lock());
            run_interactive(&mut prompt)?
        }
    };

    if let (true, Outcome::Completed { metrics, .. }) = (args.json, &outcome) {
        println!("{}", serde_json::to_string_pretty(metrics)?);
    }

    Ok(())
}
