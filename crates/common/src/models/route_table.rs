use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::constants::PASS_THROUGH_ROUTE;
use crate::error::{GatewayError, Result};
use crate::models::route::{Route, RouteDefinition, RouteKind, UrlTemplate};
use crate::validation::ConfigError;

/// Shape of a routes file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteFile {
    #[serde(default)]
    pub routes: Vec<RouteDefinition>,
}

/// Endpoint name to route mapping, read-only once built
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, Route>,
}

impl RouteTable {
    /// Table holding only the generic pass-through route
    pub fn builtin() -> Self {
        let def = RouteDefinition::pass_through(PASS_THROUGH_ROUTE);
        let route = Route {
            name: def.name,
            template: UrlTemplate::parse(&def.url),
            required_params: def.params,
            kind: RouteKind::PassThrough,
            composite: None,
        };

        let mut routes = HashMap::new();
        routes.insert(PASS_THROUGH_ROUTE.to_string(), route);
        Self { routes }
    }

    /// Build a table from definitions, rejecting invalid or duplicate routes
    pub fn from_definitions<I>(definitions: I) -> std::result::Result<Self, ConfigError>
    where
        I: IntoIterator<Item = RouteDefinition>,
    {
        let mut routes = HashMap::new();

        for def in definitions {
            let route = Route::try_from(def)?;
            if routes.contains_key(route.name()) {
                return Err(ConfigError::DuplicateRoute(route.name().to_string()));
            }
            routes.insert(route.name().to_string(), route);
        }

        Ok(Self { routes })
    }

    /// Parse a JSON routes file
    pub fn from_json(json: &str) -> std::result::Result<Self, ConfigError> {
        let file: RouteFile = serde_json::from_str(json)?;
        Self::from_definitions(file.routes)
    }

    /// Routes from `other` replace routes of the same name in `self`
    pub fn merge(mut self, other: RouteTable) -> Self {
        for (name, route) in other.routes {
            if self.routes.contains_key(&name) {
                debug!("Route '{}' overridden", name);
            }
            self.routes.insert(name, route);
        }
        self
    }

    pub fn lookup(&self, name: &str) -> Result<&Route> {
        self.routes
            .get(name)
            .ok_or_else(|| GatewayError::EndpointNotFound(name.to_string()))
    }

    /// Route names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
