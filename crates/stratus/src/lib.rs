//! Stratus - declare cloud architecture diagrams in Rust and render them with Graphviz.
//!
//! A diagram is declared with [`DiagramBuilder`]: nodes typed by an AWS
//! [`NodeKind`](kind::NodeKind), clusters nested through closures, and
//! directed or undirected edges. [`Renderer`] lowers the result to a Graphviz
//! graph and writes a single image file.

pub mod blueprint;
pub mod config;
pub mod export;

mod builder;
mod error;

pub use stratus_core::{color, kind, semantic, style};

pub use builder::DiagramBuilder;
pub use error::StratusError;
pub use stratus_core::error::ConstructError;

use std::path::{Path, PathBuf};

use log::{debug, info};

use config::AppConfig;
use export::{dot::Theme, graphviz::GraphvizExporter};
use semantic::{Diagram, OutputFormat};

/// Renders declared diagrams to files.
///
/// # Examples
///
/// ```rust,no_run
/// use stratus::{Renderer, blueprint::Blueprint, config::AppConfig};
///
/// let diagram = Blueprint::MultiAccount.build().expect("Failed to declare");
///
/// let renderer = Renderer::new(AppConfig::default());
/// let path = renderer.render(&diagram, None).expect("Failed to render");
///
/// println!("Diagram saved as: {}", path.display());
/// ```
#[derive(Debug, Default)]
pub struct Renderer {
    config: AppConfig,
}

impl Renderer {
    /// Create a new renderer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The format `diagram` will be written in: the configured override if
    /// any, otherwise the diagram's own format.
    pub fn effective_format(&self, diagram: &Diagram) -> OutputFormat {
        self.config.render().format().unwrap_or(diagram.format())
    }

    /// Returns the DOT source `diagram` lowers to.
    ///
    /// # Errors
    ///
    /// Returns [`StratusError::Config`] if the configured style is invalid.
    pub fn to_dot(&self, diagram: &Diagram) -> Result<String, StratusError> {
        Ok(self.exporter()?.source(diagram))
    }

    /// Render `diagram` and write it to `output`.
    ///
    /// Without an explicit `output` the file goes to the working directory,
    /// named after the diagram's file stem with the extension of the
    /// effective format. An existing file is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`StratusError::Render`] if Graphviz is missing or fails, and
    /// [`StratusError::Config`] if the configured style is invalid. No file
    /// is written in either case.
    pub fn render(
        &self,
        diagram: &Diagram,
        output: Option<&Path>,
    ) -> Result<PathBuf, StratusError> {
        let format = self.effective_format(diagram);
        let path = match output {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(format!("{}.{}", diagram.file_stem(), format.extension())),
        };

        info!(
            title = diagram.title(),
            path = path.display().to_string();
            "Diagram will be saved as"
        );
        debug!(
            nodes = diagram.nodes().len(),
            clusters = diagram.clusters().len(),
            edges = diagram.edges().len();
            "Rendering diagram"
        );

        let mut exporter = self.exporter()?;
        export::write_output(&mut exporter, diagram, format, &path)?;

        info!(path = path.display().to_string(); "Diagram rendered successfully");
        Ok(path)
    }

    fn exporter(&self) -> Result<GraphvizExporter, StratusError> {
        let theme = Theme::try_from(self.config.style()).map_err(StratusError::Config)?;
        Ok(GraphvizExporter::new(self.config.render().clone(), theme))
    }
}
