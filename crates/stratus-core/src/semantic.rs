//! Declared diagram model.
//!
//! These types hold what a diagram declares: which nodes exist, how clusters
//! nest, and which edges connect nodes. They carry no layout information;
//! positioning is left entirely to the rendering engine.
//!
//! # Pipeline Position
//!
//! ```text
//! DiagramBuilder calls
//!     ↓ build
//! Semantic Model (these types)
//!     ↓ lower
//! Graphviz graph
//!     ↓ render
//! Output File
//! ```
//!
//! # Organization
//!
//! - [`diagram`] - The root [`Diagram`], [`RankDirection`], [`OutputFormat`]
//! - [`element`] - [`Node`], [`Cluster`], [`Edge`], [`Connector`] and their handles

pub mod diagram;
pub mod element;

pub use diagram::*;
pub use element::*;
