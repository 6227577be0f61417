//! Diagram elements.
//!
//! - [`Node`] - one infrastructure element, identified by its [`NodeId`]
//! - [`Cluster`] - a named group of nodes and nested clusters
//! - [`Edge`] - a relationship between two nodes, styled by a [`Connector`]
//!
//! Handles ([`NodeId`], [`ClusterId`]) remember which diagram issued them.
//! Identity is by handle, never by label: two nodes labeled `"IGW"` are two
//! distinct nodes.

use std::fmt;

use crate::{
    color::Color,
    kind::NodeKind,
    style::{ArrowDirection, LineStyle},
};

/// Handle to a node inside one diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    owner: u64,
    index: usize,
}

impl NodeId {
    /// Creates a handle for the node at `index` of the diagram identified by `owner`.
    pub fn new(owner: u64, index: usize) -> Self {
        Self { owner, index }
    }

    /// Identity of the diagram that issued this handle.
    pub fn owner(self) -> u64 {
        self.owner
    }

    /// Position of the node in its diagram's node list.
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}@{}", self.index, self.owner)
    }
}

/// Handle to a cluster inside one diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterId {
    owner: u64,
    index: usize,
}

impl ClusterId {
    /// Creates a handle for the cluster at `index` of the diagram identified by `owner`.
    pub fn new(owner: u64, index: usize) -> Self {
        Self { owner, index }
    }

    /// Identity of the diagram that issued this handle.
    pub fn owner(self) -> u64 {
        self.owner
    }

    /// Position of the cluster in its diagram's cluster list.
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cluster{}@{}", self.index, self.owner)
    }
}

/// A direct child of the diagram root or of a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member {
    Node(NodeId),
    Cluster(ClusterId),
}

/// One infrastructure element.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    label: String,
    cluster: Option<ClusterId>,
}

impl Node {
    /// Create a new Node. `cluster` is the immediate enclosing cluster, if any.
    pub fn new(
        id: NodeId,
        kind: NodeKind,
        label: impl Into<String>,
        cluster: Option<ClusterId>,
    ) -> Self {
        Self {
            id,
            kind,
            label: label.into(),
            cluster,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The cluster this node was declared in, or `None` for top-level nodes.
    pub fn cluster(&self) -> Option<ClusterId> {
        self.cluster
    }
}

/// A named group of nodes and nested clusters.
///
/// Clusters only affect visual containment. Members keep the order they were
/// declared in.
#[derive(Debug, Clone)]
pub struct Cluster {
    id: ClusterId,
    label: String,
    parent: Option<ClusterId>,
    depth: usize,
    members: Vec<Member>,
}

impl Cluster {
    /// Create an empty cluster. `depth` is 0 for clusters declared at the diagram root.
    pub fn new(
        id: ClusterId,
        label: impl Into<String>,
        parent: Option<ClusterId>,
        depth: usize,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            parent,
            depth,
            members: Vec::new(),
        }
    }

    pub fn id(&self) -> ClusterId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent(&self) -> Option<ClusterId> {
        self.parent
    }

    /// Nesting depth, 0 for clusters declared at the diagram root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Direct children, in declaration order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub(crate) fn push_member(&mut self, member: Member) {
        self.members.push(member);
    }
}

/// How an edge is drawn: arrow direction, label, layout hint and stroke.
///
/// # Examples
///
/// ```
/// use stratus_core::{semantic::Connector, style::ArrowDirection};
///
/// let deploy = Connector::flow().with_label("Deploy via CI/CD");
/// assert_eq!(deploy.direction(), ArrowDirection::Forward);
///
/// let encrypts = Connector::association();
/// assert!(!encrypts.direction().is_directed());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connector {
    direction: ArrowDirection,
    label: Option<String>,
    min_len: Option<u32>,
    color: Option<Color>,
    line: Option<LineStyle>,
}

impl Connector {
    /// A directed edge from source to target.
    pub fn flow() -> Self {
        Self::default()
    }

    /// An undirected edge.
    pub fn association() -> Self {
        Self {
            direction: ArrowDirection::Plain,
            ..Self::default()
        }
    }

    /// Points the arrow from target back to source.
    pub fn reversed(mut self) -> Self {
        self.direction = ArrowDirection::Backward;
        self
    }

    /// Arrowheads on both ends.
    pub fn bidirectional(mut self) -> Self {
        self.direction = ArrowDirection::Bidirectional;
        self
    }

    pub fn with_direction(mut self, direction: ArrowDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Asks the layout engine to keep the edge at least `min_len` ranks long.
    pub fn with_min_len(mut self, min_len: u32) -> Self {
        self.min_len = Some(min_len);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_line(mut self, line: LineStyle) -> Self {
        self.line = Some(line);
        self
    }

    pub fn direction(&self) -> ArrowDirection {
        self.direction
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn min_len(&self) -> Option<u32> {
        self.min_len
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn line(&self) -> Option<LineStyle> {
        self.line
    }
}

/// A declared relationship between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
    connector: Connector,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId, connector: Connector) -> Self {
        Self {
            source,
            target,
            connector,
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }
}
