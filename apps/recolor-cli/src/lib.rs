//! Command-line front end for recolor-core
//!
//! The binary either prompts for a PDF path and an RGB color or takes both
//! from flags, then writes `<name>_colored.pdf` next to the input.

pub mod app;
pub mod colors;
pub mod config;
pub mod input;
pub mod prompt;

pub use app::{run_interactive, run_with_args, Outcome};
pub use config::Args;
pub use prompt::Prompt;
