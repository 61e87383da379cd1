use http::HeaderMap;

/// Fully resolved outbound request
///
/// Only built once every required parameter was supplied.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    /// Target URL with all required placeholders substituted
    pub url: String,

    /// Allow-listed headers copied from the inbound request
    pub headers: HeaderMap,
}

impl ResolvedTarget {
    pub fn new(url: String, headers: HeaderMap) -> Self {
        Self { url, headers }
    }

    /// Names of the headers that will be sent, for logging
    pub fn header_names(&self) -> Vec<&str> {
        self.headers.keys().map(|k| k.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_target_creation() {
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", "test-agent".parse().unwrap());

        let target = ResolvedTarget::new("https://example.com/a".to_string(), headers);

        assert_eq!(target.url, "https://example.com/a");
        assert_eq!(target.header_names(), ["user-agent"]);
    }
}
