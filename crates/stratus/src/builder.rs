//! Declarative construction of diagrams.
//!
//! [`DiagramBuilder`] keeps a stack of open clusters. Anything created while a
//! cluster is open belongs to it, and a cluster is open exactly for the
//! duration of the closure passed to [`DiagramBuilder::cluster`], so
//! membership follows lexical nesting and cannot be reassigned later.
//!
//! Edge helpers mirror the usual ways of wiring an architecture diagram:
//!
//! - [`connect`](DiagramBuilder::connect): one edge
//! - [`fan_out`](DiagramBuilder::fan_out) / [`fan_in`](DiagramBuilder::fan_in): one edge per node of a set
//! - [`chain`](DiagramBuilder::chain): consecutive pairs of a sequence
//!
//! All helpers validate every endpoint before adding anything, so a rejected
//! call leaves the diagram untouched.

use log::debug;

use stratus_core::{
    error::ConstructError,
    kind::NodeKind,
    semantic::{ClusterId, Connector, Diagram, NodeId, OutputFormat, RankDirection},
};

/// Builder for declaring a [`Diagram`].
///
/// # Examples
///
/// ```
/// use stratus::{
///     DiagramBuilder,
///     kind::NodeKind,
///     semantic::{Connector, RankDirection},
/// };
///
/// # fn main() -> Result<(), stratus::ConstructError> {
/// let mut builder = DiagramBuilder::new("Dev Environment").with_direction(RankDirection::TopBottom);
///
/// let (alb, app) = builder.cluster("Dev", |dev| {
///     let alb = dev.node(NodeKind::LoadBalancer, "Dev ALB")?;
///     let app = dev.node(NodeKind::Ec2, "App Server")?;
///     Ok::<_, stratus::ConstructError>((alb, app))
/// })?;
/// builder.connect(alb, app, Connector::flow().with_label("Deploy"))?;
///
/// let diagram = builder.build();
/// assert_eq!(diagram.clusters().len(), 1);
/// assert_eq!(diagram.nodes().len(), 2);
/// assert_eq!(diagram.edges().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DiagramBuilder {
    diagram: Diagram,
    scope: Vec<ClusterId>,
}

impl DiagramBuilder {
    /// Starts a diagram with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            diagram: Diagram::new(title),
            scope: Vec::new(),
        }
    }

    /// Sets the layout direction hint.
    pub fn with_direction(mut self, direction: RankDirection) -> Self {
        self.diagram.set_direction(direction);
        self
    }

    /// Sets the output file stem. Without one, the stem is derived from the title.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.diagram.set_filename(filename);
        self
    }

    /// Sets the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.diagram.set_format(format);
        self
    }

    /// The innermost open cluster, or `None` at the diagram root.
    pub fn current_cluster(&self) -> Option<ClusterId> {
        self.scope.last().copied()
    }

    /// Declares a node in the current scope.
    ///
    /// Every call creates a new node, even when the label repeats.
    pub fn node(
        &mut self,
        kind: NodeKind,
        label: impl Into<String>,
    ) -> Result<NodeId, ConstructError> {
        self.diagram.add_node(kind, label, self.current_cluster())
    }

    /// Opens a cluster, runs `body` inside it and closes it again.
    ///
    /// Whatever `body` returns is passed through, which is how handles created
    /// inside the cluster are handed back to the caller. The cluster is closed
    /// even when `body` fails.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructError::BlankClusterLabel`] for a blank label, or
    /// whatever error `body` produced.
    pub fn cluster<T, E, F>(&mut self, label: impl Into<String>, body: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<ConstructError>,
    {
        let id = self.diagram.add_cluster(label, self.current_cluster())?;
        debug!(cluster:% = id, depth = self.scope.len(); "Opening cluster");

        self.scope.push(id);
        let result = body(self);
        self.scope.pop();

        result
    }

    /// Declares a single edge.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructError::UnknownNode`] if either endpoint belongs to
    /// another diagram.
    pub fn connect(
        &mut self,
        from: NodeId,
        to: NodeId,
        connector: Connector,
    ) -> Result<(), ConstructError> {
        self.diagram.add_edge(from, to, connector)
    }

    /// Declares one edge from `from` to each node of `targets`.
    ///
    /// Equivalent to calling [`connect`](Self::connect) once per target with
    /// the same connector.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructError::TooFewEndpoints`] for an empty target set and
    /// [`ConstructError::UnknownNode`] for a foreign handle.
    pub fn fan_out(
        &mut self,
        from: NodeId,
        targets: &[NodeId],
        connector: Connector,
    ) -> Result<(), ConstructError> {
        require_endpoints("fan_out", targets, 1)?;
        self.check_all(std::iter::once(&from).chain(targets))?;

        for &target in targets {
            self.diagram.add_edge(from, target, connector.clone())?;
        }
        Ok(())
    }

    /// Declares one edge from each node of `sources` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructError::TooFewEndpoints`] for an empty source set and
    /// [`ConstructError::UnknownNode`] for a foreign handle.
    pub fn fan_in(
        &mut self,
        sources: &[NodeId],
        to: NodeId,
        connector: Connector,
    ) -> Result<(), ConstructError> {
        require_endpoints("fan_in", sources, 1)?;
        self.check_all(sources.iter().chain(std::iter::once(&to)))?;

        for &source in sources {
            self.diagram.add_edge(source, to, connector.clone())?;
        }
        Ok(())
    }

    /// Declares an edge between every consecutive pair of `nodes`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructError::TooFewEndpoints`] for fewer than two nodes
    /// and [`ConstructError::UnknownNode`] for a foreign handle.
    pub fn chain(&mut self, nodes: &[NodeId], connector: Connector) -> Result<(), ConstructError> {
        require_endpoints("chain", nodes, 2)?;
        self.check_all(nodes)?;

        for pair in nodes.windows(2) {
            self.diagram.add_edge(pair[0], pair[1], connector.clone())?;
        }
        Ok(())
    }

    /// Finishes construction.
    pub fn build(self) -> Diagram {
        debug!(
            nodes = self.diagram.nodes().len(),
            clusters = self.diagram.clusters().len(),
            edges = self.diagram.edges().len();
            "Diagram declared"
        );
        self.diagram
    }

    fn check_all<'a>(
        &self,
        nodes: impl IntoIterator<Item = &'a NodeId>,
    ) -> Result<(), ConstructError> {
        nodes
            .into_iter()
            .try_for_each(|&node| self.diagram.check_node(node))
    }
}

fn require_endpoints(
    operation: &'static str,
    nodes: &[NodeId],
    required: usize,
) -> Result<(), ConstructError> {
    if nodes.len() < required {
        return Err(ConstructError::TooFewEndpoints {
            operation,
            required,
            actual: nodes.len(),
        });
    }
    Ok(())
}
