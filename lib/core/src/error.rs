use crate::graph::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Edge #{edge} references undeclared node: {node}")]
    UnknownEndpoint { edge: usize, node: NodeId },

    #[error("Too many {what}: {count} exceeds limit of {limit}")]
    TooLarge {
        what: &'static str,
        count: usize,
        limit: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
