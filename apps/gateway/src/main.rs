use anyhow::{Context, Result};
use api_gateway::config::Config;
use api_gateway::transport::ReqwestTransport;
use api_gateway::{AppState, build_router};
use api_gateway_common::constants::UPSTREAM_TIMEOUT_SECS;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CLI arguments for the gateway server
#[derive(Parser, Debug)]
#[command(name = "apigw")]
#[command(about = "Key-authenticated HTTP API gateway", long_about = None)]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "GATEWAY_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "5000")]
    port: u16,

    /// Accepted access keys, comma separated
    #[arg(short, long, env = "GATEWAY_KEYS", value_delimiter = ',')]
    keys: Vec<String>,

    /// JSON file with additional routes
    #[arg(short, long, env = "GATEWAY_ROUTES")]
    routes: Option<PathBuf>,

    /// Landing page served at `/`
    #[arg(long, env = "GATEWAY_INDEX", default_value = "index.html")]
    index: PathBuf,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = UPSTREAM_TIMEOUT_SECS)]
    upstream_timeout: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn config_from_args(args: Args) -> Result<Config> {
    let ip: IpAddr = args
        .host
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", args.host))?;

    let mut config = Config::new(SocketAddr::new(ip, args.port), args.keys);
    config.routes_file = args.routes;
    config.index_path = args.index;
    config.upstream_timeout = Duration::from_secs(args.upstream_timeout);

    Ok(config)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl-C, shutting down gracefully...");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over --verbose when set
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("API Gateway v{}", env!("CARGO_PKG_VERSION"));

    let config = config_from_args(args)?;
    let routes = config.route_table()?;
    let transport = ReqwestTransport::new(config.upstream_timeout)
        .context("Failed to build upstream HTTP client")?;

    info!(
        "{} access keys, upstream timeout {}s",
        config.keys.len(),
        config.upstream_timeout.as_secs()
    );

    let state = AppState::new(
        routes,
        config.keys,
        Arc::new(transport),
        config.index_path,
    );

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Listening on http://{}", config.bind_address);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            host: "127.0.0.1".to_string(),
            port: 5000,
            keys: vec!["testkey123".to_string(), "educationalkey".to_string()],
            routes: None,
            index: PathBuf::from("index.html"),
            upstream_timeout: 15,
            verbose: false,
        }
    }

    #[test]
    fn test_config_from_args() {
        let config = config_from_args(args()).unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:5000".parse().unwrap());
        assert_eq!(config.keys.len(), 2);
        assert!(config.keys.contains("educationalkey"));
        assert_eq!(config.upstream_timeout, Duration::from_secs(15));
        assert!(config.routes_file.is_none());
    }

    #[test]
    fn test_config_from_args_with_routes() {
        let args = Args {
            host: "0.0.0.0".to_string(),
            port: 8080,
            routes: Some(PathBuf::from("routes.json")),
            upstream_timeout: 3,
            ..args()
        };

        let config = config_from_args(args).unwrap();
        assert_eq!(config.bind_address.port(), 8080);
        assert_eq!(config.routes_file, Some(PathBuf::from("routes.json")));
        assert_eq!(config.upstream_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_host() {
        let args = Args {
            host: "not an address".to_string(),
            ..args()
        };

        assert!(config_from_args(args).is_err());
    }

    #[test]
    fn test_parse_comma_separated_keys() {
        let args = Args::try_parse_from(["apigw", "--keys", "a,b,c", "--port", "6000"]).unwrap();

        assert_eq!(args.keys, ["a", "b", "c"]);
        assert_eq!(args.port, 6000);
    }
}
