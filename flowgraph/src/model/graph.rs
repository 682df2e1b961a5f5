use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::DiGraph;
use petgraph::graph::EdgeIndex;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use serde::Deserialize;
use serde::Serialize;

use crate::error::GraphError;

/// Role an address plays relative to the queried address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeGroup {
    /// The queried address
    Primary,
    /// Funds the primary address
    Source,
    /// Receives from the primary address
    Sink,
}

impl NodeGroup {
    pub const ALL: [NodeGroup; 3] = [NodeGroup::Primary, NodeGroup::Source, NodeGroup::Sink];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub group: NodeGroup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub value: f64,
}

/// Flat `{nodes, links}` form used for JSON export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GraphSummary {
    pub primary: usize,
    pub sources: usize,
    pub sinks: usize,
    pub links: usize,
    pub total_value: f64,
}

/// Address graph: one node per distinct address, one link per transfer.
///
/// Nodes iterate in first-seen order and links in insertion order. Parallel
/// links between the same pair are kept as separate edges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "GraphExport", try_from = "GraphExport")]
pub struct GraphModel {
    graph: DiGraph<GraphNode, GraphLink>,
    node_indices: HashMap<String, NodeIndex>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
        }
    }

    /// Insert a node unless the id is already present. An existing node keeps its group.
    pub fn add_node(
        &mut self,
        id: &str,
        group: NodeGroup,
    ) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(id) {
            return idx;
        }

        let idx = self.graph.add_node(GraphNode {
            id: id.to_string(),
            group,
        });
        self.node_indices.insert(id.to_string(), idx);

        idx
    }

    /// Append a link between two nodes obtained from [`GraphModel::add_node`].
    pub fn connect(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        value: f64,
    ) -> EdgeIndex {
        let link = GraphLink {
            source: self.graph[source].id.clone(),
            target: self.graph[target].id.clone(),
            value,
        };

        self.graph.add_edge(source, target, link)
    }

    pub fn add_link(
        &mut self,
        source: &str,
        target: &str,
        value: f64,
    ) -> Result<EdgeIndex, GraphError> {
        let source_idx = self.index_of(source).ok_or_else(|| GraphError::UnknownNode(source.to_string()))?;
        let target_idx = self.index_of(target).ok_or_else(|| GraphError::UnknownNode(target.to_string()))?;

        Ok(self.connect(source_idx, target_idx, value))
    }

    pub fn index_of(
        &self,
        id: &str,
    ) -> Option<NodeIndex> {
        self.node_indices.get(id).copied()
    }

    pub fn contains(
        &self,
        id: &str,
    ) -> bool {
        self.node_indices.contains_key(id)
    }

    pub fn node(
        &self,
        id: &str,
    ) -> Option<&GraphNode> {
        self.index_of(id).and_then(|idx| self.graph.node_weight(idx))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> + '_ {
        self.graph.node_weights()
    }

    pub fn links(&self) -> impl Iterator<Item = &GraphLink> + '_ {
        self.graph.edge_weights()
    }

    /// Links as `(source position, target position, link)` where positions follow `nodes()` order
    pub fn link_positions(&self) -> impl Iterator<Item = (usize, usize, &GraphLink)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source().index(), edge.target().index(), edge.weight()))
    }

    /// Sum of the values of every link touching `id`, or `None` when the node has no links.
    /// A self-loop is counted once.
    pub fn total_value(
        &self,
        id: &str,
    ) -> Option<f64> {
        let idx = self.index_of(id)?;
        let mut touched = false;
        let mut total = 0.0;

        for edge in self.graph.edges_directed(idx, Direction::Outgoing) {
            touched = true;
            total += edge.weight().value;
        }
        for edge in self.graph.edges_directed(idx, Direction::Incoming) {
            if edge.source() == idx {
                continue;
            }
            touched = true;
            total += edge.weight().value;
        }

        touched.then_some(total)
    }

    pub fn summary(&self) -> GraphSummary {
        let mut summary = GraphSummary {
            links: self.link_count(),
            total_value: self.links().map(|link| link.value).sum(),
            ..GraphSummary::default()
        };

        for node in self.nodes() {
            match node.group {
                NodeGroup::Primary => summary.primary += 1,
                NodeGroup::Source => summary.sources += 1,
                NodeGroup::Sink => summary.sinks += 1,
            }
        }

        summary
    }

    pub fn to_export(&self) -> GraphExport {
        GraphExport {
            nodes: self.nodes().cloned().collect(),
            links: self.links().cloned().collect(),
        }
    }
}

impl PartialEq for GraphModel {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.nodes().eq(other.nodes()) && self.links().eq(other.links())
    }
}

impl From<GraphModel> for GraphExport {
    fn from(model: GraphModel) -> Self {
        model.to_export()
    }
}

impl TryFrom<GraphExport> for GraphModel {
    type Error = GraphError;

    fn try_from(export: GraphExport) -> Result<Self, Self::Error> {
        let mut model = GraphModel::new();

        for node in &export.nodes {
            if model.contains(&node.id) {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
            model.add_node(&node.id, node.group);
        }
        for link in &export.links {
            model.add_link(&link.source, &link.target, link.value)?;
        }

        Ok(model)
    }
}
