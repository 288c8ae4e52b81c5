// Kahn-style cycle detection over a submitted pipeline graph
use crate::graph::{Edge, Graph, NodeId};
use crate::{Error, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// How edges pointing at undeclared nodes are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DanglingPolicy {
    /// Fail with [`Error::UnknownEndpoint`] on the first dangling edge
    #[default]
    Reject,
    /// Treat undeclared endpoints as declared nodes (they count toward `node_count`)
    Implicit,
    /// Legacy bookkeeping: undeclared targets take part in the sort and are
    /// counted as processed, undeclared sources are never seeded
    Compatible,
}

impl DanglingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DanglingPolicy::Reject => "reject",
            DanglingPolicy::Implicit => "implicit",
            DanglingPolicy::Compatible => "compatible",
        }
    }
}

impl fmt::Display for DanglingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DanglingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(DanglingPolicy::Reject),
            "implicit" => Ok(DanglingPolicy::Implicit),
            "compatible" | "compat" => Ok(DanglingPolicy::Compatible),
            other => Err(Error::InvalidConfig(format!(
                "unknown dangling edge policy '{}' (expected reject, implicit or compatible)",
                other
            ))),
        }
    }
}

/// Upper bounds on submitted graph size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphLimits {
    pub max_nodes: usize,
    pub max_edges: usize,
}

impl Default for GraphLimits {
    fn default() -> Self {
        Self {
            max_nodes: 10_000,
            max_edges: 50_000,
        }
    }
}

impl GraphLimits {
    pub fn new(max_nodes: usize, max_edges: usize) -> Self {
        Self { max_nodes, max_edges }
    }

    pub fn unbounded() -> Self {
        Self {
            max_nodes: usize::MAX,
            max_edges: usize::MAX,
        }
    }

    pub fn check(&self, graph: &Graph) -> Result<()> {
        if graph.node_count() > self.max_nodes {
            return Err(Error::TooLarge {
                what: "nodes",
                count: graph.node_count(),
                limit: self.max_nodes,
            });
        }
        if graph.edge_count() > self.max_edges {
            return Err(Error::TooLarge {
                what: "edges",
                count: graph.edge_count(),
                limit: self.max_edges,
            });
        }
        Ok(())
    }
}

/// Structural facts about a submitted graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphReport {
    pub node_count: usize,
    pub edge_count: usize,
    pub is_dag: bool,
}

/// Stateless DAG checker.
///
/// Holds only configuration, so a single instance can be shared freely
/// between threads; every call builds its own working state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleChecker {
    policy: DanglingPolicy,
    limits: GraphLimits,
}

impl CycleChecker {
    pub fn new(policy: DanglingPolicy, limits: GraphLimits) -> Self {
        Self { policy, limits }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: DanglingPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: GraphLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn policy(&self) -> DanglingPolicy {
        self.policy
    }

    pub fn limits(&self) -> GraphLimits {
        self.limits
    }

    /// Count nodes and edges and decide whether the graph is acyclic.
    ///
    /// An empty node set is always a DAG, whatever edges were submitted.
    /// Fails only when the graph exceeds the configured limits or, under
    /// [`DanglingPolicy::Reject`], when an edge names an undeclared node.
    pub fn evaluate(&self, graph: &Graph) -> Result<GraphReport> {
        self.limits.check(graph)?;

        let mut report = GraphReport {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            is_dag: true,
        };

        if graph.is_empty() {
            debug!(edges = report.edge_count, "empty node set, trivially acyclic");
            return Ok(report);
        }

        match self.policy {
            DanglingPolicy::Reject => {
                if let Some((edge, node)) = first_dangling(graph) {
                    warn!(edge, node = %node, "rejecting edge with undeclared endpoint");
                    return Err(Error::UnknownEndpoint { edge, node });
                }
                let sort = TopoSort::build(graph, true).run();
                report.is_dag = sort.processed == sort.vertices;
            }
            DanglingPolicy::Implicit => {
                let sort = TopoSort::build(graph, true).run();
                report.node_count += sort.vertices - sort.declared;
                report.is_dag = sort.processed == sort.vertices;
            }
            DanglingPolicy::Compatible => {
                let sort = TopoSort::build(graph, false).run();
                report.is_dag = sort.processed == graph.node_count();
            }
        }

        debug!(
            nodes = report.node_count,
            edges = report.edge_count,
            is_dag = report.is_dag,
            policy = %self.policy,
            "graph evaluated"
        );
        Ok(report)
    }
}

/// Evaluate with the default checker (reject dangling edges, default limits)
pub fn evaluate(graph: &Graph) -> Result<GraphReport> {
    CycleChecker::default().evaluate(graph)
}

fn first_dangling(graph: &Graph) -> Option<(usize, NodeId)> {
    let declared: ahash::AHashSet<&str> = graph.nodes.iter().map(String::as_str).collect();
    graph.edges.iter().enumerate().find_map(|(i, Edge { source, target })| {
        if !declared.contains(source.as_str()) {
            Some((i, source.clone()))
        } else if !declared.contains(target.as_str()) {
            Some((i, target.clone()))
        } else {
            None
        }
    })
}

struct SortOutcome {
    /// Distinct declared node ids
    declared: usize,
    /// Entries in the in-degree table (declared plus any phantoms)
    vertices: usize,
    processed: usize,
}

struct TopoSort<'a> {
    in_degree: AHashMap<&'a str, usize>,
    adjacency: AHashMap<&'a str, Vec<&'a str>>,
    declared: usize,
}

impl<'a> TopoSort<'a> {
    /// Targets always get an in-degree entry. Sources only get one when
    /// `register_sources` is set; otherwise an undeclared source is never
    /// seeded and its outgoing edges are never released.
    fn build(graph: &'a Graph, register_sources: bool) -> Self {
        let mut in_degree: AHashMap<&str, usize> =
            AHashMap::with_capacity(graph.node_count());
        let mut adjacency: AHashMap<&str, Vec<&str>> = AHashMap::new();

        for id in &graph.nodes {
            in_degree.insert(id.as_str(), 0);
        }
        let declared = in_degree.len();

        for edge in &graph.edges {
            let (source, target) = (edge.source.as_str(), edge.target.as_str());
            if register_sources {
                in_degree.entry(source).or_insert(0);
            }
            adjacency.entry(source).or_default().push(target);
            *in_degree.entry(target).or_insert(0) += 1;
        }

        Self {
            in_degree,
            adjacency,
            declared,
        }
    }

    fn run(mut self) -> SortOutcome {
        let vertices = self.in_degree.len();
        let mut queue: VecDeque<&str> = self
            .in_degree
            .iter()
            .filter(|&(_, &degree)| degree == 0)
            .map(|(&id, _)| id)
            .collect();

        let mut processed = 0;
        while let Some(current) = queue.pop_front() {
            processed += 1;
            let Some(successors) = self.adjacency.remove(current) else {
                continue;
            };
            for next in successors {
                if let Some(degree) = self.in_degree.get_mut(next) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(next);
                    }
                }
            }
        }

        SortOutcome {
            declared: self.declared,
            vertices,
            processed,
        }
    }
}
