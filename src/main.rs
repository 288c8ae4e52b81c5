use clap::Parser;
use dagcheck_api::{ApiConfig, RestApi, DEFAULT_ALLOWED_ORIGINS};
use dagcheck_core::{CycleChecker, DanglingPolicy, GraphLimits};
use std::any::Any;
use tracing::{error, info, Level};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Validates pipeline graphs submitted by the visual editor
#[derive(Parser, Debug)]
#[command(name = "dagcheck")]
#[command(about = "Pipeline graph validator - node/edge counts and DAG check", long_about = None)]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = 8000)]
    http_port: u16,

    /// Log level (RUST_LOG takes precedence when set)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Allowed CORS origin (repeatable, defaults to the local dev servers)
    #[arg(long = "allowed-origin", value_name = "ORIGIN")]
    allowed_origins: Vec<String>,

    /// Handling of edges that name undeclared nodes: reject, implicit or compatible
    #[arg(long, default_value = "reject")]
    dangling_edges: DanglingPolicy,

    /// Maximum number of nodes per pipeline
    #[arg(long, default_value_t = 10_000)]
    max_nodes: usize,

    /// Maximum number of edges per pipeline
    #[arg(long, default_value_t = 50_000)]
    max_edges: usize,

    /// Maximum request body size in bytes
    #[arg(long, default_value_t = 2 * 1024 * 1024)]
    max_payload_bytes: usize,
}

impl Args {
    fn api_config(&self) -> ApiConfig {
        let allowed_origins = if self.allowed_origins.is_empty() {
            DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect()
        } else {
            self.allowed_origins.clone()
        };

        ApiConfig {
            host: self.host.clone(),
            port: self.http_port,
            allowed_origins,
            checker: CycleChecker::new(
                self.dangling_edges,
                GraphLimits::new(self.max_nodes, self.max_edges),
            ),
            max_payload_bytes: self.max_payload_bytes,
        }
    }
}

fn log_filter(level: &str) -> EnvFilter {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    EnvFilter::default().add_directive(LevelFilter::from_level(level).into())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_filter(&args.log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = args.api_config();
    config.validate()?;

    info!("Starting dagcheck v{}", env!("CARGO_PKG_VERSION"));
    info!("Dangling edge policy: {}", config.checker.policy());
    info!(
        "Limits: {} nodes, {} edges, {} bytes",
        config.checker.limits().max_nodes,
        config.checker.limits().max_edges,
        config.max_payload_bytes
    );
    info!("Allowed origins: {}", config.allowed_origins.join(", "));

    let host = config.host.clone();
    let http_port = config.port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on {}:{}", host, http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(config).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://{}:{}/", args.host, args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        joined = tokio::task::spawn_blocking(move || http_handle.join()) => {
            match joined {
                Ok(Ok(())) => info!("HTTP server stopped"),
                Ok(Err(payload)) => error!("HTTP server thread panicked: {}", panic_message(payload.as_ref())),
                Err(e) => error!("Failed to join HTTP server thread: {}", e),
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_levels() {
        assert_eq!(log_filter("debug").to_string().to_lowercase(), "debug");
        assert_eq!(log_filter("error").to_string().to_lowercase(), "error");
        assert_eq!(log_filter("verbose").to_string().to_lowercase(), "info");
    }

    #[test]
    fn test_panic_message() {
        let joined = std::thread::spawn(|| panic!("bind failed")).join();
        let payload = joined.unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "bind failed");

        let formatted = std::thread::spawn(|| panic!("port {} in use", 8000)).join();
        assert_eq!(panic_message(formatted.unwrap_err().as_ref()), "port 8000 in use");

        let opaque: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(opaque.as_ref()), "unknown panic payload");
    }
}
