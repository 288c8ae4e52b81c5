//! # dagcheck Core
//!
//! Core library for the dagcheck pipeline validator.
//!
//! This crate provides the graph model and the cycle detector:
//!
//! - [`Graph`] - Declared node ids plus directed [`Edge`]s
//! - [`CycleChecker`] - Kahn-style acyclicity check with node/edge counts
//! - [`DanglingPolicy`] - What to do with edges naming undeclared nodes
//! - [`GraphLimits`] - Caps on submitted graph size
//!
//! ## Example
//!
//! ```rust
//! use dagcheck_core::{CycleChecker, Graph};
//!
//! let graph = Graph::from_ids(["1", "2", "3"], [("1", "2"), ("2", "3")]);
//! let report = CycleChecker::default().evaluate(&graph).unwrap();
//!
//! assert_eq!(report.node_count, 3);
//! assert_eq!(report.edge_count, 2);
//! assert!(report.is_dag);
//! ```

pub mod checker;
pub mod error;
pub mod graph;

pub use checker::{evaluate, CycleChecker, DanglingPolicy, GraphLimits, GraphReport};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, NodeId};
