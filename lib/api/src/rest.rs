use actix_cors::Cors;
use actix_web::{error, web, App, HttpRequest, HttpResponse, HttpServer, Result as ActixResult};
use dagcheck_core::{CycleChecker, Edge, Error, Graph, GraphReport};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

use crate::config::ApiConfig;

#[derive(Debug, Deserialize)]
pub struct PipelineRequest {
    nodes: Vec<NodeRequest>,
    edges: Vec<EdgeRequest>,
}

// Editor metadata is checked for shape, then dropped before evaluation
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct NodeRequest {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    position: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct EdgeRequest {
    id: String,
    source: String,
    target: String,
    #[serde(rename = "sourceHandle", default)]
    source_handle: Option<String>,
    #[serde(rename = "targetHandle", default)]
    target_handle: Option<String>,
}

impl From<PipelineRequest> for Graph {
    fn from(req: PipelineRequest) -> Self {
        Graph::new(
            req.nodes.into_iter().map(|n| n.id).collect(),
            req.edges
                .into_iter()
                .map(|e| Edge::new(e.source, e.target))
                .collect(),
        )
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineResponse {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub is_dag: bool,
}

impl From<GraphReport> for PipelineResponse {
    fn from(report: GraphReport) -> Self {
        Self {
            num_nodes: report.node_count,
            num_edges: report.edge_count,
            is_dag: report.is_dag,
        }
    }
}

pub struct RestApi;

impl RestApi {
    pub async fn start(config: ApiConfig) -> std::io::Result<()> {
        let bind = (config.host.clone(), config.port);
        HttpServer::new(move || {
            App::new()
                .wrap(RestApi::cors(&config.allowed_origins))
                .configure(|cfg| RestApi::configure(cfg, &config))
        })
        .bind(bind)?
        .run()
        .await
    }

    pub fn cors(allowed_origins: &[String]) -> Cors {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600)
    }

    /// Register shared state, JSON limits and routes
    pub fn configure(cfg: &mut web::ServiceConfig, config: &ApiConfig) {
        cfg.app_data(web::Data::new(config.checker))
            .app_data(
                web::JsonConfig::default()
                    .limit(config.max_payload_bytes)
                    .error_handler(json_error_handler),
            )
            .route("/", web::get().to(ping))
            .route("/health", web::get().to(health_check))
            .route("/pipelines/parse", web::post().to(parse_pipeline))
            .route("/test-dag", web::get().to(test_dag));
    }
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = serde_json::json!({ "error": err.to_string() });
    let response = match &err {
        error::JsonPayloadError::OverflowKnownLength { .. }
        | error::JsonPayloadError::Overflow { .. } => HttpResponse::PayloadTooLarge().json(body),
        error::JsonPayloadError::ContentType => HttpResponse::UnsupportedMediaType().json(body),
        _ => HttpResponse::UnprocessableEntity().json(body),
    };
    warn!("Rejected pipeline payload: {}", err);
    error::InternalError::from_response(err, response).into()
}

fn error_response(err: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        Error::TooLarge { .. } => HttpResponse::PayloadTooLarge().json(body),
        Error::UnknownEndpoint { .. } => HttpResponse::BadRequest().json(body),
        Error::InvalidConfig(_) => HttpResponse::InternalServerError().json(body),
    }
}

async fn ping() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "Ping": "Pong" })))
}

async fn health_check() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "message": "Backend is running correctly"
    })))
}

async fn parse_pipeline(
    checker: web::Data<CycleChecker>,
    req: web::Json<PipelineRequest>,
) -> ActixResult<HttpResponse> {
    let graph = Graph::from(req.into_inner());

    match checker.evaluate(&graph) {
        Ok(report) => {
            info!(
                "Parsed pipeline: {} nodes, {} edges, is_dag={}",
                report.node_count, report.edge_count, report.is_dag
            );
            Ok(HttpResponse::Ok().json(PipelineResponse::from(report)))
        }
        Err(e) => {
            warn!("Pipeline rejected: {}", e);
            Ok(error_response(&e))
        }
    }
}

async fn test_dag(checker: web::Data<CycleChecker>) -> ActixResult<HttpResponse> {
    let graph = Graph::from_ids(["1", "2", "3"], [("1", "2"), ("2", "3")]);

    match checker.evaluate(&graph) {
        Ok(report) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "test_case": "Linear pipeline",
            "nodes": report.node_count,
            "edges": report.edge_count,
            "is_dag": report.is_dag,
            "expected": true
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_keeps_only_ids_and_endpoints() {
        let req: PipelineRequest = serde_json::from_value(serde_json::json!({
            "nodes": [
                { "id": "in", "type": "customInput", "data": { "inputName": "q" }, "position": { "x": 1, "y": 2.5 } },
                { "id": "out", "type": "customOutput" }
            ],
            "edges": [
                { "id": "e1", "source": "in", "target": "out", "sourceHandle": "in-value", "targetHandle": null }
            ]
        }))
        .unwrap();

        let graph = Graph::from(req);
        assert_eq!(graph, Graph::from_ids(["in", "out"], [("in", "out")]));
    }

    #[test]
    fn test_request_requires_node_type_and_edge_id() {
        let missing_type = serde_json::json!({ "nodes": [{ "id": "a" }], "edges": [] });
        assert!(serde_json::from_value::<PipelineRequest>(missing_type).is_err());

        let missing_edge_id = serde_json::json!({
            "nodes": [{ "id": "a", "type": "input" }],
            "edges": [{ "source": "a", "target": "a" }]
        });
        assert!(serde_json::from_value::<PipelineRequest>(missing_edge_id).is_err());
    }
}
