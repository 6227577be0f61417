//! Lowering of the declared model into a Graphviz graph.
//!
//! The mapping is direct:
//!
//! - the diagram becomes a `digraph` whose label is the title
//! - every cluster becomes a `cluster_<n>` subgraph, nested as declared
//! - every node becomes `n<k>`, where `k` is its handle index, so identity
//!   follows handles and not labels
//! - every edge becomes `a -> b` with a `dir` attribute; undirected edges use
//!   `dir=none`
//!
//! Nothing here positions anything. Layout is the engine's job.

use dot_structures::{
    Attribute, Edge as DotEdge, EdgeTy, Graph, GraphAttributes, Id, Node as DotNode,
    NodeId as DotNodeId, Stmt, Subgraph, Vertex,
};
use indexmap::IndexMap;

use stratus_core::{
    color::Color,
    semantic::{Cluster, Diagram, Edge, Member, Node, NodeId},
};

use crate::config::StyleConfig;

const FONT_COLOR: &str = "#2D3436";
const CLUSTER_PEN_COLOR: &str = "#AEB6BE";
const EDGE_COLOR: &str = "#7B8894";

/// Resolved styling used while lowering.
///
/// Built from a [`StyleConfig`] with every color already validated.
#[derive(Debug, Clone)]
pub struct Theme {
    background: Option<Color>,
    font_name: String,
    font_size: u32,
    cluster_palette: Vec<Color>,
    graph_attributes: IndexMap<String, String>,
}

impl TryFrom<&StyleConfig> for Theme {
    type Error = String;

    fn try_from(style: &StyleConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            background: style.background_color()?,
            font_name: style.font_name().to_string(),
            font_size: style.font_size(),
            cluster_palette: style.cluster_palette()?,
            graph_attributes: style.graph_attributes().clone(),
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::try_from(&StyleConfig::default()).expect("default style colors are valid")
    }
}

impl Theme {
    fn cluster_background(&self, depth: usize) -> &Color {
        &self.cluster_palette[depth % self.cluster_palette.len()]
    }
}

/// Escapes `value` for use inside a quoted DOT string.
pub fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn quoted(value: &str) -> Id {
    Id::Escaped(format!("\"{}\"", escape(value)))
}

fn plain(value: impl ToString) -> Id {
    Id::Plain(value.to_string())
}

fn attr(key: &str, value: Id) -> Attribute {
    Attribute(plain(key), value)
}

/// DOT identifier of a node.
pub fn node_name(id: NodeId) -> String {
    format!("n{}", id.index())
}

fn dot_node_id(id: NodeId) -> DotNodeId {
    DotNodeId(plain(node_name(id)), None)
}

/// DOT identifier of a cluster subgraph. The `cluster` prefix makes Graphviz draw a box.
pub fn cluster_name(cluster: &Cluster) -> String {
    format!("cluster_{}", cluster.id().index())
}

/// Lowers a diagram into a Graphviz graph.
pub fn lower(diagram: &Diagram, theme: &Theme) -> Graph {
    let mut stmts = vec![
        Stmt::GAttribute(GraphAttributes::Graph(graph_attributes(diagram, theme))),
        Stmt::GAttribute(GraphAttributes::Node(node_defaults(theme))),
        Stmt::GAttribute(GraphAttributes::Edge(edge_defaults(theme))),
    ];
    stmts.extend(lower_members(diagram, diagram.members(), theme));
    stmts.extend(diagram.edges().iter().map(|edge| Stmt::Edge(lower_edge(edge))));

    Graph::DiGraph {
        id: quoted(diagram.title()),
        strict: false,
        stmts,
    }
}

fn graph_attributes(diagram: &Diagram, theme: &Theme) -> Vec<Attribute> {
    let mut attributes = vec![
        attr("label", quoted(diagram.title())),
        attr("rankdir", plain(diagram.direction())),
        attr("pad", quoted("2.0")),
        attr("splines", plain("ortho")),
        attr("nodesep", quoted("0.60")),
        attr("ranksep", quoted("0.75")),
        attr("fontname", quoted(&theme.font_name)),
        attr("fontsize", plain(theme.font_size)),
        attr("fontcolor", quoted(FONT_COLOR)),
    ];
    if let Some(background) = &theme.background {
        attributes.push(attr("bgcolor", quoted(&background.to_graphviz())));
    }
    attributes.extend(
        theme
            .graph_attributes
            .iter()
            .map(|(key, value)| Attribute(quoted(key), quoted(value))),
    );
    attributes
}

fn node_defaults(theme: &Theme) -> Vec<Attribute> {
    vec![
        attr("shape", plain("box")),
        attr("style", quoted("rounded,filled")),
        attr("fontname", quoted(&theme.font_name)),
        attr("fontsize", plain(13)),
        attr("fontcolor", quoted(FONT_COLOR)),
        attr("margin", quoted("0.2,0.1")),
    ]
}

fn edge_defaults(theme: &Theme) -> Vec<Attribute> {
    vec![
        attr("color", quoted(EDGE_COLOR)),
        attr("fontname", quoted(&theme.font_name)),
        attr("fontsize", plain(11)),
        attr("fontcolor", quoted(FONT_COLOR)),
    ]
}

fn lower_members(diagram: &Diagram, members: &[Member], theme: &Theme) -> Vec<Stmt> {
    members
        .iter()
        .filter_map(|member| match *member {
            Member::Node(id) => diagram.node(id).map(|node| Stmt::Node(lower_node(node))),
            Member::Cluster(id) => diagram
                .cluster(id)
                .map(|cluster| Stmt::Subgraph(lower_cluster(diagram, cluster, theme))),
        })
        .collect()
}

fn lower_cluster(diagram: &Diagram, cluster: &Cluster, theme: &Theme) -> Subgraph {
    let background = theme.cluster_background(cluster.depth()).to_graphviz();
    let mut stmts = vec![
        Stmt::Attribute(attr("label", quoted(cluster.label()))),
        Stmt::Attribute(attr("labeljust", plain("l"))),
        Stmt::Attribute(attr("style", quoted("rounded,filled"))),
        Stmt::Attribute(attr("pencolor", quoted(CLUSTER_PEN_COLOR))),
        Stmt::Attribute(attr("bgcolor", quoted(&background))),
        Stmt::Attribute(attr("fontsize", plain(12))),
    ];
    stmts.extend(lower_members(diagram, cluster.members(), theme));

    Subgraph {
        id: plain(cluster_name(cluster)),
        stmts,
    }
}

fn lower_node(node: &Node) -> DotNode {
    let category = node.kind().category();
    DotNode::new(
        dot_node_id(node.id()),
        vec![
            attr("label", quoted(node.label())),
            attr("shape", plain(category.shape())),
            attr("fillcolor", quoted(category.fill_color())),
            attr("tooltip", quoted(&node.kind().to_string())),
        ],
    )
}

fn lower_edge(edge: &Edge) -> DotEdge {
    let connector = edge.connector();
    let mut attributes = vec![attr("dir", plain(connector.direction().graphviz_dir()))];
    if let Some(label) = connector.label() {
        attributes.push(attr("label", quoted(label)));
    }
    if let Some(min_len) = connector.min_len() {
        attributes.push(attr("minlen", plain(min_len)));
    }
    if let Some(color) = connector.color() {
        attributes.push(attr("color", quoted(&color.to_graphviz())));
    }
    if let Some(line) = connector.line() {
        attributes.push(attr("style", plain(line.graphviz_style())));
    }

    DotEdge {
        ty: EdgeTy::Pair(
            Vertex::N(dot_node_id(edge.source())),
            Vertex::N(dot_node_id(edge.target())),
        ),
        attributes,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use stratus_core::{
        error::ConstructError,
        kind::NodeKind,
        semantic::{Connector, RankDirection},
        style::LineStyle,
    };

    use graphviz_rust::printer::{DotPrinter, PrinterContext};

    use super::*;
    use crate::DiagramBuilder;

    fn stmts(graph: &Graph) -> &[Stmt] {
        match graph {
            Graph::DiGraph { stmts, .. } | Graph::Graph { stmts, .. } => stmts,
        }
    }

    fn subgraphs(stmts: &[Stmt]) -> Vec<&Subgraph> {
        stmts
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Subgraph(subgraph) => Some(subgraph),
                _ => None,
            })
            .collect()
    }

    fn node_names(stmts: &[Stmt]) -> Vec<String> {
        stmts
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Node(DotNode {
                    id: DotNodeId(Id::Plain(name), _),
                    ..
                }) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    fn edges(stmts: &[Stmt]) -> Vec<&DotEdge> {
        stmts
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Edge(edge) => Some(edge),
                _ => None,
            })
            .collect()
    }

    fn has_attr(attributes: &[Attribute], key: &str, value: Id) -> bool {
        attributes.contains(&attr(key, value))
    }

    fn dev_scenario() -> Diagram {
        let mut builder = DiagramBuilder::new("Dev Scenario");
        let (alb, app) = builder
            .cluster("Dev", |dev| {
                let alb = dev.node(NodeKind::LoadBalancer, "Dev ALB")?;
                let app = dev.node(NodeKind::Ec2, "App Server")?;
                Ok::<_, ConstructError>((alb, app))
            })
            .unwrap();
        builder
            .connect(alb, app, Connector::flow().with_label("Deploy"))
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_dev_scenario_lowers_to_one_cluster_two_nodes_one_edge() {
        let graph = lower(&dev_scenario(), &Theme::default());
        let top = stmts(&graph);

        let clusters = subgraphs(top);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].id, Id::Plain("cluster_0".to_string()));
        assert!(node_names(top).is_empty());
        assert_eq!(node_names(&clusters[0].stmts), vec!["n0", "n1"]);

        let edges = edges(top);
        assert_eq!(edges.len(), 1);
        assert!(has_attr(&edges[0].attributes, "dir", plain("forward")));
        assert!(has_attr(&edges[0].attributes, "label", quoted("Deploy")));
    }

    #[test]
    fn test_nested_clusters_keep_their_nodes() {
        let mut builder = DiagramBuilder::new("Nested");
        builder
            .cluster("Dev VPC", |vpc| {
                vpc.node(NodeKind::InternetGateway, "IGW")?;
                vpc.cluster("Public Subnet", |subnet| {
                    subnet.node(NodeKind::LoadBalancer, "Dev ALB")
                })?;
                Ok::<_, ConstructError>(())
            })
            .unwrap();
        builder.node(NodeKind::Kms, "KMS Keys").unwrap();

        let graph = lower(&builder.build(), &Theme::default());
        let top = stmts(&graph);
        assert_eq!(node_names(top), vec!["n2"]);

        let vpc = subgraphs(top);
        assert_eq!(vpc.len(), 1);
        assert_eq!(node_names(&vpc[0].stmts), vec!["n0"]);

        let subnet = subgraphs(&vpc[0].stmts);
        assert_eq!(subnet.len(), 1);
        assert_eq!(subnet[0].id, Id::Plain("cluster_1".to_string()));
        assert_eq!(node_names(&subnet[0].stmts), vec!["n1"]);
    }

    #[test]
    fn test_cluster_background_follows_depth() {
        let mut builder = DiagramBuilder::new("Depth");
        builder
            .cluster("Outer", |outer| outer.cluster("Inner", |_| Ok::<_, ConstructError>(())))
            .unwrap();

        let graph = lower(&builder.build(), &Theme::default());
        let outer = subgraphs(stmts(&graph))[0];
        let inner = subgraphs(&outer.stmts)[0];

        assert!(outer.stmts.contains(&Stmt::Attribute(attr("bgcolor", quoted("#e5f5fd")))));
        assert!(inner.stmts.contains(&Stmt::Attribute(attr("bgcolor", quoted("#ebf3e7")))));
    }

    #[test]
    fn test_edge_attributes() {
        let mut builder = DiagramBuilder::new("Edges");
        let kms = builder.node(NodeKind::Kms, "KMS").unwrap();
        let db = builder.node(NodeKind::Rds, "DB").unwrap();
        builder
            .connect(
                kms,
                db,
                Connector::association()
                    .with_min_len(2)
                    .with_line(LineStyle::Dashed)
                    .with_color(Color::new("red").unwrap()),
            )
            .unwrap();

        let graph = lower(&builder.build(), &Theme::default());
        let edge = edges(stmts(&graph))[0];

        assert_eq!(
            edge.ty,
            EdgeTy::Pair(Vertex::N(dot_node_id(kms)), Vertex::N(dot_node_id(db)))
        );
        assert!(has_attr(&edge.attributes, "dir", plain("none")));
        assert!(has_attr(&edge.attributes, "minlen", plain(2)));
        assert!(has_attr(&edge.attributes, "style", plain("dashed")));
        assert!(has_attr(&edge.attributes, "color", quoted("#ff0000")));
        assert!(!edge.attributes.iter().any(|a| a.0 == plain("label")));
    }

    #[test]
    fn test_graph_attributes_carry_title_and_direction() {
        let diagram = DiagramBuilder::new("AWS \"Prod\"")
            .with_direction(RankDirection::TopBottom)
            .build();

        let graph = lower(&diagram, &Theme::default());
        let Stmt::GAttribute(GraphAttributes::Graph(attributes)) = &stmts(&graph)[0] else {
            panic!("first statement should hold graph attributes");
        };

        assert!(has_attr(attributes, "label", Id::Escaped("\"AWS \\\"Prod\\\"\"".to_string())));
        assert!(has_attr(attributes, "rankdir", plain("TB")));
        assert!(!attributes.iter().any(|a| a.0 == plain("bgcolor")));
    }

    #[test]
    fn test_configured_graph_attributes_are_appended() {
        let style: StyleConfig = toml::from_str(
            r#"
            background_color = "white"

            [graph_attributes]
            splines = "spline"
            "#,
        )
        .unwrap();
        let theme = Theme::try_from(&style).unwrap();

        let graph = lower(&Diagram::new("Styled"), &theme);
        let Stmt::GAttribute(GraphAttributes::Graph(attributes)) = &stmts(&graph)[0] else {
            panic!("first statement should hold graph attributes");
        };

        assert!(has_attr(attributes, "bgcolor", quoted("#ffffff")));
        assert_eq!(
            attributes.last(),
            Some(&Attribute(quoted("splines"), quoted("spline")))
        );
    }

    #[test]
    fn test_configured_attribute_keys_are_quoted() {
        let style: StyleConfig = toml::from_str(
            r#"
            [graph_attributes]
            "odd \"key\"" = "1"
            "#,
        )
        .unwrap();
        let theme = Theme::try_from(&style).unwrap();

        let graph = lower(&Diagram::new("Keys"), &theme);
        let source = graph.print(&mut PrinterContext::default());
        assert!(source.contains(r#""odd \"key\""="1""#));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape("a\\b"), "a\\\\b");
        assert_eq!(escape("two\nlines"), "two\\nlines");
    }

    proptest! {
        #[test]
        fn escaped_labels_have_no_bare_quotes(label in ".*") {
            let escaped = escape(&label);
            let mut chars = escaped.chars();
            while let Some(c) = chars.next() {
                match c {
                    '\\' => { prop_assert!(chars.next().is_some()); }
                    '"' | '\n' => prop_assert!(false, "unescaped {c:?} in {escaped:?}"),
                    _ => {}
                }
            }
        }
    }
}
