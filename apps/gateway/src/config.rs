use anyhow::{Context, Result};
use api_gateway_common::constants::UPSTREAM_TIMEOUT_SECS;
use api_gateway_common::{CredentialSet, RouteTable};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Configuration for the gateway server
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_address: SocketAddr,

    /// Accepted access keys
    pub keys: CredentialSet,

    /// Optional JSON routes file merged over the built-in table
    pub routes_file: Option<PathBuf>,

    /// Landing page served at `/`
    pub index_path: PathBuf,

    /// Timeout for each upstream call
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn new(bind_address: SocketAddr, keys: Vec<String>) -> Self {
        Self {
            bind_address,
            keys: CredentialSet::new(keys),
            routes_file: None,
            index_path: PathBuf::from("index.html"),
            upstream_timeout: Duration::from_secs(UPSTREAM_TIMEOUT_SECS),
        }
    }

    /// Build the route table, warning about settings that reject every request
    pub fn route_table(&self) -> Result<RouteTable> {
        if self.keys.is_empty() {
            warn!("No access keys configured, every gateway request will be rejected");
        }

        load_route_table(self.routes_file.as_deref())
    }
}

/// Built-in routes, overridden and extended by the routes file when given
pub fn load_route_table(path: Option<&Path>) -> Result<RouteTable> {
    let builtin = RouteTable::builtin();

    let Some(path) = path else {
        info!("Using built-in routes: {}", builtin.names().join(", "));
        return Ok(builtin);
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read routes file {}", path.display()))?;
    let file_routes = RouteTable::from_json(&json)
        .with_context(|| format!("Invalid routes file {}", path.display()))?;

    let table = builtin.merge(file_routes);
    info!(
        "Loaded {} routes from {}: {}",
        table.len(),
        path.display(),
        table.names().join(", ")
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_gateway_common::constants::PASS_THROUGH_ROUTE;
    use std::io::Write;

    fn write_routes(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::new("127.0.0.1:5000".parse().unwrap(), vec!["k".to_string()]);

        assert_eq!(config.upstream_timeout, Duration::from_secs(15));
        assert_eq!(config.index_path, PathBuf::from("index.html"));
        assert!(config.keys.contains("k"));
        assert!(config.routes_file.is_none());
    }

    #[test]
    fn test_load_builtin_routes() {
        let table = load_route_table(None).unwrap();
        assert!(table.lookup(PASS_THROUGH_ROUTE).is_ok());
    }

    #[test]
    fn test_load_routes_file() {
        let file = write_routes(
            r#"{"routes": [
                {"name": "weather", "url": "https://wx.example.com/{city}", "params": ["city"]}
            ]}"#,
        );

        let table = load_route_table(Some(file.path())).unwrap();
        assert_eq!(table.names(), [PASS_THROUGH_ROUTE, "weather"]);
    }

    #[test]
    fn test_example_routes_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../routes.example.json");

        let table = load_route_table(Some(&path)).unwrap();
        assert_eq!(table.names(), ["geo", PASS_THROUGH_ROUTE, "login", "weather"]);
        assert!(table.lookup("login").unwrap().composite().is_some());
    }

    #[test]
    fn test_invalid_routes_file() {
        let file = write_routes(
            r#"{"routes": [
                {"name": "weather", "url": "https://wx.example.com/{city}", "params": ["town"]}
            ]}"#,
        );

        let err = load_route_table(Some(file.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("undeclared placeholder 'city'"));
    }

    #[test]
    fn test_missing_routes_file() {
        let err = load_route_table(Some(Path::new("/nonexistent/routes.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read routes file"));
    }
}
