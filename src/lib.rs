//! # dagcheck
//!
//! Validates pipeline graphs built in a visual editor: counts nodes and
//! edges and reports whether the graph is a DAG.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install dagcheck
//! dagcheck --http-port 8000 --dangling-edges reject
//! ```
//!
//! ```bash
//! curl -X POST localhost:8000/pipelines/parse \
//!   -H 'content-type: application/json' \
//!   -d '{"nodes":[{"id":"a","type":"input"},{"id":"b","type":"output"}],
//!        "edges":[{"id":"e1","source":"a","target":"b"}]}'
//! # {"num_nodes":2,"num_edges":1,"is_dag":true}
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use dagcheck::prelude::*;
//!
//! let graph = Graph::from_ids(["1", "2", "3"], [("1", "2"), ("2", "3"), ("3", "1")]);
//! let report = CycleChecker::default().evaluate(&graph).unwrap();
//! assert!(!report.is_dag);
//! ```
//!
//! ## Crate Structure
//!
//! - [`dagcheck-core`](https://docs.rs/dagcheck-core) - Graph model and cycle checker
//! - [`dagcheck-api`](https://docs.rs/dagcheck-api) - REST transport

// Re-export core types
pub use dagcheck_core::{
    evaluate, CycleChecker, DanglingPolicy, Edge, Error, Graph, GraphLimits, GraphReport,
    NodeId, Result,
};

// Re-export API
pub use dagcheck_api::{ApiConfig, PipelineRequest, PipelineResponse, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CycleChecker, DanglingPolicy, Edge, Error, Graph, GraphLimits, GraphReport, NodeId,
        Result,
        ApiConfig, RestApi,
    };
}
