// Pipeline graph model - only node identity and edge endpoints reach the checker
use serde::{Deserialize, Serialize};

pub type NodeId = String;

/// A directed edge between two node identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    #[inline]
    #[must_use]
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl<S: Into<NodeId>, T: Into<NodeId>> From<(S, T)> for Edge {
    fn from((source, target): (S, T)) -> Self {
        Edge::new(source, target)
    }
}

/// A submitted graph: declared nodes plus directed edges.
///
/// Built once per evaluation and never mutated afterwards. Duplicate node
/// identifiers are allowed and refer to the same vertex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<Edge>,
}

impl Graph {
    #[inline]
    #[must_use]
    pub fn new(nodes: Vec<NodeId>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Build a graph from anything that yields node ids and `(source, target)` pairs
    pub fn from_ids<N, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator,
        N::Item: Into<NodeId>,
        E: IntoIterator,
        E::Item: Into<Edge>,
    {
        Self {
            nodes: nodes.into_iter().map(Into::into).collect(),
            edges: edges.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_node(mut self, id: impl Into<NodeId>) -> Self {
        self.nodes.push(id.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_edge(mut self, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        self.edges.push(Edge::new(source, target));
        self
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ids() {
        let graph = Graph::from_ids(["a", "b"], [("a", "b"), ("b", "b")]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edges[0], Edge::new("a", "b"));
        assert!(graph.edges[1].is_self_loop());
    }

    #[test]
    fn test_builder() {
        let graph = Graph::default().with_node("x").with_node("x").with_edge("x", "y");
        assert_eq!(graph.nodes, vec!["x".to_string(), "x".to_string()]);
        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.is_empty());
        assert!(Graph::default().is_empty());
    }
}
