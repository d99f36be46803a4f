//! Code for reading the regulation parameters file.
use crate::input::{input_err_msg, read_toml};
use crate::regulation::Regulation;
use anyhow::{Context, Result};
use std::path::Path;

const REGULATION_FILE_NAME: &str = "regulation.toml";

/// Read regulation parameters from the specified model directory.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
pub fn read_regulation(model_dir: &Path) -> Result<Regulation> {
    let file_path = model_dir.join(REGULATION_FILE_NAME);
    let regulation: Regulation = read_toml(&file_path)?;
    regulation
        .validate()
        .with_context(|| input_err_msg(&file_path))?;

    Ok(regulation)
}
