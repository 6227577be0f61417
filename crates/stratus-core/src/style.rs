//! Edge styling primitives.
//!
//! - [`ArrowDirection`]: which ends of an edge carry an arrowhead
//! - [`LineStyle`]: the stroke pattern of an edge

/// Defines the direction of arrow markers.
///
/// - `Forward`: arrowhead at the target
/// - `Backward`: arrowhead at the source
/// - `Bidirectional`: arrowheads at both ends
/// - `Plain`: no arrowheads, an undirected association
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowDirection {
    #[default]
    Forward,
    Backward,
    Bidirectional,
    Plain,
}

impl ArrowDirection {
    /// Returns `true` unless the edge is a plain association.
    pub fn is_directed(self) -> bool {
        self != Self::Plain
    }

    /// Value of the Graphviz `dir` edge attribute.
    pub fn graphviz_dir(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "back",
            Self::Bidirectional => "both",
            Self::Plain => "none",
        }
    }
}

/// Stroke pattern of an edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Bold,
}

impl LineStyle {
    /// Value of the Graphviz `style` edge attribute.
    pub fn graphviz_style(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Bold => "bold",
        }
    }
}
