//! # dagcheck API
//!
//! REST transport for the dagcheck pipeline validator. Parses editor
//! payloads, hands node ids and edge endpoints to
//! [`dagcheck_core::CycleChecker`], and serves the liveness routes.

pub mod config;
pub mod rest;

pub use config::{ApiConfig, DEFAULT_ALLOWED_ORIGINS};
pub use rest::{PipelineRequest, PipelineResponse, RestApi};
