//! Graphviz export backend.

use std::io;

use graphviz_rust::{
    cmd::{CommandArg, Format},
    exec,
    printer::{DotPrinter, PrinterContext},
};
use log::{debug, info};

use stratus_core::semantic::{Diagram, OutputFormat};

use super::{
    Error, Exporter,
    dot::{self, Theme},
};
use crate::config::RenderConfig;

/// Runs a diagram through Graphviz.
///
/// For [`OutputFormat::Dot`] the lowered graph is printed instead and the
/// engine is never started.
#[derive(Debug, Clone)]
pub struct GraphvizExporter {
    render: RenderConfig,
    theme: Theme,
}

impl GraphvizExporter {
    pub fn new(render: RenderConfig, theme: Theme) -> Self {
        Self { render, theme }
    }

    /// Returns the DOT source for `diagram`.
    pub fn source(&self, diagram: &Diagram) -> String {
        dot::lower(diagram, &self.theme).print(&mut PrinterContext::default())
    }

    fn command_args(&self, format: OutputFormat) -> Vec<CommandArg> {
        let mut args = vec![
            CommandArg::Custom(format!("-K{}", self.render.engine())),
            CommandArg::Format(engine_format(format)),
        ];
        if let Some(dpi) = self.render.dpi() {
            args.push(CommandArg::Custom(format!("-Gdpi={dpi}")));
        }
        args
    }
}

impl Exporter for GraphvizExporter {
    fn export(&mut self, diagram: &Diagram, format: OutputFormat) -> Result<Vec<u8>, Error> {
        if format == OutputFormat::Dot {
            debug!("Writing DOT source without running the engine");
            return Ok(self.source(diagram).into_bytes());
        }

        info!(engine:% = self.render.engine(), format:% = format; "Running Graphviz");
        let graph = dot::lower(diagram, &self.theme);
        exec(graph, &mut PrinterContext::default(), self.command_args(format)).map_err(
            |err| match err.kind() {
                io::ErrorKind::NotFound => Error::EngineUnavailable(err),
                _ => Error::EngineFailed(err.to_string()),
            },
        )
    }
}

fn engine_format(format: OutputFormat) -> Format {
    match format {
        OutputFormat::Png => Format::Png,
        OutputFormat::Jpg => Format::Jpg,
        OutputFormat::Svg => Format::Svg,
        OutputFormat::Pdf => Format::Pdf,
        OutputFormat::Dot => Format::Dot,
    }
}

#[cfg(test)]
mod tests {
    use stratus_core::{kind::NodeKind, semantic::Connector};

    use super::*;
    use crate::config::LayoutEngine;

    fn exporter() -> GraphvizExporter {
        GraphvizExporter::new(RenderConfig::default(), Theme::default())
    }

    #[test]
    fn test_dot_format_skips_engine() {
        let mut diagram = Diagram::new("Source Only");
        let igw = diagram
            .add_node(NodeKind::InternetGateway, "IGW", None)
            .unwrap();
        let nat = diagram.add_node(NodeKind::NatGateway, "NAT Gateway", None).unwrap();
        diagram.add_edge(igw, nat, Connector::association()).unwrap();

        let bytes = exporter().export(&diagram, OutputFormat::Dot).unwrap();
        let source = String::from_utf8(bytes).unwrap();

        assert!(source.contains("digraph"));
        assert!(source.contains("\"NAT Gateway\""));
        assert!(source.contains("n0"));
        assert!(source.contains("n1"));
    }

    #[test]
    fn test_source_is_deterministic() {
        let mut diagram = Diagram::new("Stable");
        let vpc = diagram.add_cluster("VPC", None).unwrap();
        diagram.add_node(NodeKind::Ec2, "App", Some(vpc)).unwrap();

        assert_eq!(exporter().source(&diagram), exporter().source(&diagram));
    }

    #[test]
    fn test_command_args() {
        let render = RenderConfig::new(None, LayoutEngine::Neato, Some(200));
        let exporter = GraphvizExporter::new(render, Theme::default());

        let args = exporter.command_args(OutputFormat::Png);
        assert_eq!(args.len(), 3);
        assert!(matches!(&args[0], CommandArg::Custom(arg) if arg == "-Kneato"));
        assert!(matches!(&args[2], CommandArg::Custom(arg) if arg == "-Gdpi=200"));
    }
}
