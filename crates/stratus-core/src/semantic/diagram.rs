//! The diagram root.
//!
//! A [`Diagram`] owns every node, cluster and edge it declares. Elements are
//! appended through the `add_*` methods, which check that every handle passed
//! in was issued by this diagram. Higher level scoping (which cluster is
//! currently open) lives in the builder on top of this type.

use std::{
    fmt::{self, Display},
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
};

use log::trace;
use serde::Deserialize;

use crate::{
    error::ConstructError,
    kind::NodeKind,
    semantic::element::{Cluster, ClusterId, Connector, Edge, Member, Node, NodeId},
};

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Layout direction hint passed to the rendering engine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankDirection {
    TopBottom,
    BottomTop,
    #[default]
    LeftRight,
    RightLeft,
}

impl FromStr for RankDirection {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TB" => Ok(Self::TopBottom),
            "BT" => Ok(Self::BottomTop),
            "LR" => Ok(Self::LeftRight),
            "RL" => Ok(Self::RightLeft),
            _ => Err("Unsupported rank direction"),
        }
    }
}

impl From<RankDirection> for &'static str {
    fn from(val: RankDirection) -> Self {
        match val {
            RankDirection::TopBottom => "TB",
            RankDirection::BottomTop => "BT",
            RankDirection::LeftRight => "LR",
            RankDirection::RightLeft => "RL",
        }
    }
}

impl Display for RankDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// File format of the rendered diagram.
///
/// `Dot` writes the generated Graphviz source and does not need the engine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpg,
    Svg,
    Pdf,
    Dot,
}

impl OutputFormat {
    /// File extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        self.into()
    }
}

impl FromStr for OutputFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(Self::Png),
            "jpg" => Ok(Self::Jpg),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "dot" => Ok(Self::Dot),
            _ => Err("Unsupported output format"),
        }
    }
}

impl From<OutputFormat> for &'static str {
    fn from(val: OutputFormat) -> Self {
        match val {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Dot => "dot",
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Derives a file stem from a diagram title.
///
/// Whitespace runs become a single `_` and the result is lowercased, so
/// `"AWS Multi-Env Architecture"` becomes `"aws_multi-env_architecture"`.
pub fn file_stem_from_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// A declared architecture diagram.
///
/// This is the root of the model: title, output target, layout direction hint
/// and the nodes, clusters and edges declared in it.
#[derive(Debug, Clone)]
pub struct Diagram {
    owner: u64,
    title: String,
    direction: RankDirection,
    filename: Option<String>,
    format: OutputFormat,
    nodes: Vec<Node>,
    clusters: Vec<Cluster>,
    edges: Vec<Edge>,
    members: Vec<Member>,
}

impl Diagram {
    /// Create an empty diagram with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            title: title.into(),
            direction: RankDirection::default(),
            filename: None,
            format: OutputFormat::default(),
            nodes: Vec::new(),
            clusters: Vec::new(),
            edges: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn direction(&self) -> RankDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: RankDirection) {
        self.direction = direction;
    }

    /// Explicit file stem, if one was set.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Sets the file stem used for the output file. The extension comes from the format.
    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = Some(filename.into());
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    /// File stem for the output file: the explicit one, or one derived from the title.
    pub fn file_stem(&self) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| file_stem_from_title(&self.title))
    }

    /// Output file name: [`Diagram::file_stem`] plus the format extension.
    pub fn output_file_name(&self) -> String {
        format!("{}.{}", self.file_stem(), self.format.extension())
    }

    /// All nodes, in declaration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All clusters, in declaration order.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// All edges, in declaration order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Top-level members, in declaration order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Returns the node behind `id`, if it belongs to this diagram.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        if id.owner() != self.owner {
            return None;
        }
        self.nodes.get(id.index())
    }

    /// Returns the cluster behind `id`, if it belongs to this diagram.
    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        if id.owner() != self.owner {
            return None;
        }
        self.clusters.get(id.index())
    }

    /// Declares a node inside `parent` (or at the root).
    ///
    /// # Errors
    ///
    /// Returns [`ConstructError::UnknownCluster`] if `parent` was not issued by this diagram.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        label: impl Into<String>,
        parent: Option<ClusterId>,
    ) -> Result<NodeId, ConstructError> {
        self.check_cluster(parent)?;

        let id = NodeId::new(self.owner, self.nodes.len());
        let node = Node::new(id, kind, label, parent);
        trace!(node:?; "Adding node");
        self.nodes.push(node);
        self.push_member(parent, Member::Node(id));
        Ok(id)
    }

    /// Declares an empty cluster inside `parent` (or at the root).
    ///
    /// # Errors
    ///
    /// Returns [`ConstructError::BlankClusterLabel`] for an empty or
    /// whitespace-only label and [`ConstructError::UnknownCluster`] if
    /// `parent` was not issued by this diagram.
    pub fn add_cluster(
        &mut self,
        label: impl Into<String>,
        parent: Option<ClusterId>,
    ) -> Result<ClusterId, ConstructError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(ConstructError::BlankClusterLabel);
        }
        self.check_cluster(parent)?;

        let depth = parent
            .and_then(|id| self.cluster(id))
            .map_or(0, |cluster| cluster.depth() + 1);
        let id = ClusterId::new(self.owner, self.clusters.len());
        trace!(label = label.as_str(), depth; "Adding cluster");
        self.clusters.push(Cluster::new(id, label, parent, depth));
        self.push_member(parent, Member::Cluster(id));
        Ok(id)
    }

    /// Declares an edge between two nodes of this diagram.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructError::UnknownNode`] if either endpoint was not
    /// issued by this diagram.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        connector: Connector,
    ) -> Result<(), ConstructError> {
        self.check_node(source)?;
        self.check_node(target)?;

        self.edges.push(Edge::new(source, target, connector));
        Ok(())
    }

    /// Fails unless `id` was issued by this diagram.
    pub fn check_node(&self, id: NodeId) -> Result<(), ConstructError> {
        self.node(id)
            .map(|_| ())
            .ok_or(ConstructError::UnknownNode(id))
    }

    fn check_cluster(&self, id: Option<ClusterId>) -> Result<(), ConstructError> {
        match id {
            Some(id) if self.cluster(id).is_none() => Err(ConstructError::UnknownCluster(id)),
            _ => Ok(()),
        }
    }

    fn push_member(&mut self, parent: Option<ClusterId>, member: Member) {
        match parent {
            None => self.members.push(member),
            Some(id) => self.clusters[id.index()].push_member(member),
        }
    }
}
