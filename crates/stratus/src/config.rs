//! Configuration types for Stratus diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are handed to Graphviz and styled. All types implement
//! [`serde::Deserialize`] and every field is optional, so an empty document
//! yields the defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and style settings.
//! - [`RenderConfig`] - Output format override, [`LayoutEngine`] and resolution.
//! - [`StyleConfig`] - Fonts, background, cluster palette and raw graph attributes.
//!
//! # Example
//!
//! ```
//! # use stratus::config::{AppConfig, LayoutEngine};
//! let config = AppConfig::default();
//! assert_eq!(config.render().engine(), LayoutEngine::Dot);
//! assert_eq!(config.style().font_size(), 15);
//! ```

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use indexmap::IndexMap;
use serde::Deserialize;

use stratus_core::{color::Color, semantic::OutputFormat};

/// Background colors for clusters, cycled by nesting depth.
pub const DEFAULT_CLUSTER_PALETTE: [&str; 4] = ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];

const DEFAULT_FONT_NAME: &str = "Sans-Serif";
const DEFAULT_FONT_SIZE: u32 = 15;

/// Top-level application configuration combining render and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified render and style configurations.
    pub fn new(render: RenderConfig, style: StyleConfig) -> Self {
        Self { render, style }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the render configuration for modification.
    pub fn render_mut(&mut self) -> &mut RenderConfig {
        &mut self.render
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Graphviz layout program used to position the graph.
///
/// The names match external configuration strings (snake_case).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutEngine {
    /// Hierarchical layout (default)
    #[default]
    Dot,
    Neato,
    Fdp,
    Sfdp,
    Circo,
    Twopi,
}

impl FromStr for LayoutEngine {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dot" => Ok(Self::Dot),
            "neato" => Ok(Self::Neato),
            "fdp" => Ok(Self::Fdp),
            "sfdp" => Ok(Self::Sfdp),
            "circo" => Ok(Self::Circo),
            "twopi" => Ok(Self::Twopi),
            _ => Err("Unsupported layout engine"),
        }
    }
}

impl From<LayoutEngine> for &'static str {
    fn from(val: LayoutEngine) -> Self {
        match val {
            LayoutEngine::Dot => "dot",
            LayoutEngine::Neato => "neato",
            LayoutEngine::Fdp => "fdp",
            LayoutEngine::Sfdp => "sfdp",
            LayoutEngine::Circo => "circo",
            LayoutEngine::Twopi => "twopi",
        }
    }
}

impl Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// How the diagram is handed to the rendering engine.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RenderConfig {
    /// Output format overriding the one declared by the diagram.
    #[serde(default)]
    format: Option<OutputFormat>,

    /// Graphviz layout program.
    #[serde(default)]
    engine: LayoutEngine,

    /// Output resolution in dots per inch, for raster formats.
    #[serde(default)]
    dpi: Option<u32>,
}

impl RenderConfig {
    /// Creates a new [`RenderConfig`].
    pub fn new(format: Option<OutputFormat>, engine: LayoutEngine, dpi: Option<u32>) -> Self {
        Self {
            format,
            engine,
            dpi,
        }
    }

    /// Returns the format override, if any.
    pub fn format(&self) -> Option<OutputFormat> {
        self.format
    }

    /// Overrides the output format.
    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = Some(format);
    }

    /// Returns the configured [`LayoutEngine`].
    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    /// Returns the configured resolution, if any.
    pub fn dpi(&self) -> Option<u32> {
        self.dpi
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Fields that are not set fall back to the defaults documented on each
/// accessor. Colors are CSS color values (`#d3d3d3`, `rgb(...)`, CSS named
/// colors) parsed by the `color` crate; Graphviz X11 names such as
/// `lightgrey` are rejected.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background color of the whole diagram, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    font_name: Option<String>,

    #[serde(default)]
    font_size: Option<u32>,

    /// Cluster background colors, indexed by nesting depth.
    #[serde(default)]
    cluster_palette: Option<Vec<String>>,

    /// Extra Graphviz graph attributes, applied last and in file order.
    #[serde(default)]
    graph_attributes: IndexMap<String, String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Font family for titles, labels and edge labels. Defaults to `Sans-Serif`.
    pub fn font_name(&self) -> &str {
        self.font_name.as_deref().unwrap_or(DEFAULT_FONT_NAME)
    }

    /// Title font size in points. Defaults to 15.
    pub fn font_size(&self) -> u32 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// Returns the parsed cluster palette, or [`DEFAULT_CLUSTER_PALETTE`].
    ///
    /// # Errors
    ///
    /// Returns an error if the palette is empty or any entry is not a valid
    /// [`Color`].
    pub fn cluster_palette(&self) -> Result<Vec<Color>, String> {
        let palette = match &self.cluster_palette {
            Some(palette) if palette.is_empty() => {
                return Err("Cluster palette in config must not be empty".to_string());
            }
            Some(palette) => palette.iter().map(String::as_str).collect::<Vec<_>>(),
            None => DEFAULT_CLUSTER_PALETTE.to_vec(),
        };

        palette
            .into_iter()
            .map(Color::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| format!("Invalid cluster palette in config: {err}"))
    }

    /// Extra graph attributes, in the order they were configured.
    pub fn graph_attributes(&self) -> &IndexMap<String, String> {
        &self.graph_attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.render().format(), None);
        assert_eq!(config.render().engine(), LayoutEngine::Dot);
        assert_eq!(config.render().dpi(), None);
        assert_eq!(config.style().font_name(), "Sans-Serif");
        assert_eq!(config.style().background_color(), Ok(None));
        assert_eq!(config.style().cluster_palette().unwrap().len(), 4);
    }

    #[test]
    fn test_deserialize_full_document() {
        let config: AppConfig = toml::from_str(
            r##"
            [render]
            format = "svg"
            engine = "fdp"
            dpi = 150

            [style]
            background_color = "white"
            font_name = "Helvetica"
            font_size = 18
            cluster_palette = ["#ffffff", "#d3d3d3"]

            [style.graph_attributes]
            splines = "spline"
            nodesep = "1.0"
            "##,
        )
        .unwrap();

        assert_eq!(config.render().format(), Some(OutputFormat::Svg));
        assert_eq!(config.render().engine(), LayoutEngine::Fdp);
        assert_eq!(config.render().dpi(), Some(150));
        assert_eq!(config.style().font_name(), "Helvetica");
        assert_eq!(config.style().font_size(), 18);
        assert!(config.style().background_color().unwrap().is_some());
        assert_eq!(config.style().cluster_palette().unwrap().len(), 2);

        let keys: Vec<_> = config.style().graph_attributes().keys().collect();
        assert_eq!(keys, ["splines", "nodesep"]);
    }

    #[test]
    fn test_x11_color_name_is_rejected() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            cluster_palette = ["lightgrey"]
            "#,
        )
        .unwrap();

        let err = config.style().cluster_palette().unwrap_err();
        assert!(err.contains("lightgrey"));
    }

    #[test]
    fn test_invalid_background_color() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            background_color = "not-a-color"
            "#,
        )
        .unwrap();

        assert!(config.style().background_color().is_err());
    }

    #[test]
    fn test_empty_palette_is_rejected() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            cluster_palette = []
            "#,
        )
        .unwrap();

        assert!(config.style().cluster_palette().is_err());
    }

    #[test]
    fn test_layout_engine_from_str() {
        assert_eq!("neato".parse::<LayoutEngine>(), Ok(LayoutEngine::Neato));
        assert!("spring".parse::<LayoutEngine>().is_err());
        assert_eq!(LayoutEngine::Sfdp.to_string(), "sfdp");
    }
}
