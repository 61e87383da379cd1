use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::PASS_THROUGH_PARAM;
use crate::validation::{ConfigError, validate_route};

/// Matches `{name}` placeholders; braces are not allowed inside a name
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

/// How a route turns collected parameters into a target URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// Placeholders in a fixed URL pattern are replaced by encoded values
    #[default]
    Template,

    /// The single required parameter is the whole target URL
    PassThrough,
}

/// One placeholder filled from several parameters joined by a separator
///
/// With `placeholder = "password"`, `sources = ["email", "password"]` and
/// `separator = ":"`, the `{password}` site receives the encoded `email:password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeField {
    pub placeholder: String,
    pub sources: Vec<String>,
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    ":".to_string()
}

/// A piece of a parsed URL template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    Literal(String),
    Placeholder(String),
}

/// URL template parsed once into literal and placeholder tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    raw: String,
    tokens: Vec<TemplateToken>,
}

impl UrlTemplate {
    pub fn parse(raw: &str) -> Self {
        let mut tokens = Vec::new();
        let mut last = 0;

        for caps in PLACEHOLDER_REGEX.captures_iter(raw) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > last {
                tokens.push(TemplateToken::Literal(raw[last..whole.start()].to_string()));
            }
            tokens.push(TemplateToken::Placeholder(name.as_str().to_string()));
            last = whole.end();
        }

        if last < raw.len() {
            tokens.push(TemplateToken::Literal(raw[last..].to_string()));
        }

        Self {
            raw: raw.to_string(),
            tokens,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    /// Placeholder names in template order, duplicates included
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|t| match t {
            TemplateToken::Placeholder(name) => Some(name.as_str()),
            TemplateToken::Literal(_) => None,
        })
    }
}

/// Route as written in a routes file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    pub name: String,
    pub url: String,
    pub params: Vec<String>,
    #[serde(default)]
    pub kind: RouteKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite: Option<CompositeField>,
}

impl RouteDefinition {
    pub fn template(name: &str, url: &str, params: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            params: params.iter().map(|p| p.to_string()).collect(),
            kind: RouteKind::Template,
            composite: None,
        }
    }

    pub fn pass_through(name: &str) -> Self {
        Self {
            name: name.to_string(),
            url: format!("{{{}}}", PASS_THROUGH_PARAM),
            params: vec![PASS_THROUGH_PARAM.to_string()],
            kind: RouteKind::PassThrough,
            composite: None,
        }
    }

    pub fn with_composite(mut self, placeholder: &str, sources: &[&str], separator: &str) -> Self {
        self.composite = Some(CompositeField {
            placeholder: placeholder.to_string(),
            sources: sources.iter().map(|s| s.to_string()).collect(),
            separator: separator.to_string(),
        });
        self
    }
}

/// Validated, immutable endpoint definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub(crate) name: String,
    pub(crate) template: UrlTemplate,
    pub(crate) required_params: Vec<String>,
    pub(crate) kind: RouteKind,
    pub(crate) composite: Option<CompositeField>,
}

impl Route {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }

    /// Required parameters in declaration order
    pub fn required_params(&self) -> &[String] {
        &self.required_params
    }

    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    pub fn composite(&self) -> Option<&CompositeField> {
        self.composite.as_ref()
    }

    pub fn is_pass_through(&self) -> bool {
        self.kind == RouteKind::PassThrough
    }

    pub fn requires(&self, param: &str) -> bool {
        self.required_params.iter().any(|p| p == param)
    }
}

impl TryFrom<RouteDefinition> for Route {
    type Error = ConfigError;

    fn try_from(def: RouteDefinition) -> Result<Self, Self::Error> {
        validate_route(&def)?;

        Ok(Self {
            template: UrlTemplate::parse(&def.url),
            name: def.name,
            required_params: def.params,
            kind: def.kind,
            composite: def.composite,
        })
    }
}
