//! Input path validation and output path derivation

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("Error: The specified file does not exist.")]
    NotFound(PathBuf),

    #[error("Error: The specified file is not a PDF.")]
    NotPdf(PathBuf),
}

/// The input must exist and end in `.pdf`, ignoring case
pub fn validate_input_path(path: &Path) -> Result<(), InputError> {
    if !path.exists() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }
    if !path.to_string_lossy().to_lowercase().ends_with(".pdf") {
        return Err(InputError::NotPdf(path.to_path_buf()));
    }
    Ok(())
}

/// `<dir>/<name>.pdf` becomes `<dir>/<name>_colored.pdf`
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}_colored.pdf", stem))
}
