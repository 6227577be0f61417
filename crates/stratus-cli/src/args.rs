//! Command-line argument definitions for the Stratus CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the blueprint to render, where and in
//! which format to write it, the configuration file, and logging verbosity.

use clap::Parser;

use stratus::{blueprint::Blueprint, semantic::OutputFormat};

/// Command-line arguments for the Stratus diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Diagram to render (multi-account, shared-vpc)
    #[arg(default_value = "multi-account")]
    pub blueprint: Blueprint,

    /// Path to the output file. Defaults to a name derived from the diagram title
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format (png, jpg, svg, pdf, dot), overriding the configuration
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
