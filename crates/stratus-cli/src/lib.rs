//! CLI logic for the Stratus diagram tool.
//!
//! This module contains the core CLI logic: declare the selected blueprint,
//! apply configuration and command-line overrides, and render it to a file.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::path::{Path, PathBuf};

use log::info;

use stratus::{Renderer, StratusError};

/// Run the Stratus CLI application
///
/// Declares the blueprint named in `args`, renders it and returns the path
/// of the written file.
///
/// # Errors
///
/// Returns `StratusError` for:
/// - Configuration loading errors
/// - Diagram construction errors
/// - Missing or failing Graphviz engine
/// - File I/O errors
pub fn run(args: &Args) -> Result<PathBuf, StratusError> {
    info!(
        blueprint:% = args.blueprint,
        output_path:? = args.output;
        "Processing diagram"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(format) = args.format {
        app_config.render_mut().set_format(format);
    }

    let diagram = args.blueprint.build()?;

    let renderer = Renderer::new(app_config);
    let path = renderer.render(&diagram, args.output.as_deref().map(Path::new))?;

    info!(output_file = path.display().to_string(); "Diagram exported successfully");

    Ok(path)
}
