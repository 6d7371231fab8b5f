//! Interactive and flag-driven runs
//!
//! All user-facing text goes to the supplied writer. Neither path returns an
//! error for bad input or a failed conversion: those end in an [`Outcome`]
//! after the message has been printed.

use crate::colors::color_from_flags;
use crate::config::Args;
use crate::input::{output_path_for, validate_input_path, InputError};
use crate::prompt::Prompt;
use recolor_core::{recolor_file, ProcessMetrics, RecolorError, Rgb};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

const FALLBACK_MESSAGE: &str = "Invalid color values. Using default light cream color.";

#[derive(Debug)]
pub enum Outcome {
    /// Input path failed validation; nothing was processed
    Rejected(InputError),
    Completed {
        output: PathBuf,
        metrics: ProcessMetrics,
    },
    Failed(RecolorError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Completed { .. })
    }
}

/// Prompt for a path and a color, then recolor
pub fn run_interactive<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> io::Result<Outcome> {
    let answer = prompt.ask("Enter the path to your PDF file: ")?;
    let input = PathBuf::from(answer.trim());

    if let Err(e) = validate_input_path(&input) {
        writeln!(prompt.writer(), "{}", e)?;
        return Ok(Outcome::Rejected(e));
    }

    writeln!(
        prompt.writer(),
        "\nEnter RGB values (0-255) for the background color"
    )?;
    let color = match prompt.ask_color()? {
        Ok(color) => color,
        Err(e) => fall_back(prompt.writer(), &e)?,
    };

    let output = output_path_for(&input);
    process(prompt.writer(), &input, &output, color)
}

/// Run from command-line flags without prompting
///
/// `input` is the positional path; the remaining flags come from `args`.
pub fn run_with_args<W: Write>(input: &Path, args: &Args, out: &mut W) -> io::Result<Outcome> {
    if let Err(e) = validate_input_path(input) {
        writeln!(out, "{}", e)?;
        return Ok(Outcome::Rejected(e));
    }

    let color = match color_from_flags(
        args.red.as_deref(),
        args.green.as_deref(),
        args.blue.as_deref(),
        args.hex.as_deref(),
    ) {
        Ok(Some(color)) => color,
        Ok(None) => Rgb::default(),
        Err(e) => fall_back(out, &e)?,
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| output_path_for(input));
    process(out, input, &output, color)
}

fn fall_back<W: Write>(out: &mut W, cause: &RecolorError) -> io::Result<Rgb> {
    warn!("{}; using default background", cause);
    writeln!(out, "{}", FALLBACK_MESSAGE)?;
    Ok(Rgb::default())
}

fn process<W: Write>(out: &mut W, input: &Path, output: &Path, color: Rgb) -> io::Result<Outcome> {
    match recolor_file(input, output, color) {
        Ok(metrics) => {
            info!(
                output = %output.display(),
                pages = metrics.page_count,
                elapsed_ms = metrics.processing_time_ms,
                "Recolor complete"
            );
            writeln!(
                out,
                "Successfully created PDF with modified background: {}",
                output.display()
            )?;
            writeln!(out, "\nBackground color change completed successfully!")?;
            writeln!(out, "Modified PDF saved as: {}", output.display())?;
            Ok(Outcome::Completed {
                output: output.to_path_buf(),
                metrics,
            })
        }
        Err(e) => {
            error!(input = %input.display(), "Recolor failed: {}", e);
            writeln!(out, "An error occurred: {}", e)?;
            writeln!(
                out,
                "\nFailed to modify the PDF. Please check the input file and try again."
            )?;
            Ok(Outcome::Failed(e))
        }
    }
}
