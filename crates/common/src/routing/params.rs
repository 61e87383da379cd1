use http::HeaderMap;
use std::collections::HashMap;

use crate::constants::{AUTH_QUERY_PARAM, ENDPOINT_QUERY_PARAM};
use crate::utils::select_forward_headers;

/// Decode a raw query string into a map, last value wins on duplicate keys
pub fn parse_query(raw: Option<&str>) -> HashMap<String, String> {
    let mut params = HashMap::new();

    if let Some(raw) = raw {
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            params.insert(key.into_owned(), value.into_owned());
        }
    }

    params
}

/// Drop the control parameters, every other pair passes through unchanged
pub fn collect(raw: &HashMap<String, String>) -> HashMap<String, String> {
    raw.iter()
        .filter(|(k, _)| k.as_str() != AUTH_QUERY_PARAM && k.as_str() != ENDPOINT_QUERY_PARAM)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Everything the gateway needs from one inbound request
#[derive(Clone)]
pub struct RequestContext {
    pub endpoint: String,
    pub supplied_key: Option<String>,
    pub params: HashMap<String, String>,
    pub forward_headers: HeaderMap,
}

impl RequestContext {
    pub fn from_parts(endpoint: &str, query: Option<&str>, headers: &HeaderMap) -> Self {
        let raw = parse_query(query);

        Self {
            endpoint: endpoint.to_string(),
            supplied_key: raw.get(AUTH_QUERY_PARAM).cloned(),
            params: collect(&raw),
            forward_headers: select_forward_headers(headers),
        }
    }

    /// Parameter names in sorted order, for logging without values
    pub fn param_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.params.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("endpoint", &self.endpoint)
            .field("has_key", &self.supplied_key.is_some())
            .field("params", &self.param_names())
            .finish()
    }
}
