//! Template resolution
//!
//! Turns a route plus the caller's collected parameters into the target URL.
//! Rendering walks the token list parsed at load time, so only placeholders
//! that are required by the route are ever substituted.

use std::collections::HashMap;

use crate::error::{GatewayError, Result};
use crate::models::{CompositeField, Route, TemplateToken};
use crate::utils::encode_component;

/// Required parameters absent from `collected`, in declaration order
///
/// Presence is by key only; an empty value counts as supplied.
pub fn missing_params(route: &Route, collected: &HashMap<String, String>) -> Vec<String> {
    route
        .required_params()
        .iter()
        .filter(|p| !collected.contains_key(p.as_str()))
        .cloned()
        .collect()
}

/// Resolve the target URL for `route`
pub fn resolve(route: &Route, collected: &HashMap<String, String>) -> Result<String> {
    let missing = missing_params(route, collected);
    if !missing.is_empty() {
        return Err(GatewayError::MissingParameters {
            endpoint: route.name().to_string(),
            missing,
        });
    }

    if route.is_pass_through() {
        return resolve_pass_through(route, collected);
    }

    Ok(render(route, collected))
}

fn resolve_pass_through(route: &Route, collected: &HashMap<String, String>) -> Result<String> {
    let param = route
        .required_params()
        .first()
        .map(String::as_str)
        .unwrap_or_default();

    match collected.get(param) {
        Some(url) if !url.is_empty() => Ok(url.clone()),
        _ => Err(GatewayError::EmptyPassThrough {
            endpoint: route.name().to_string(),
            param: param.to_string(),
        }),
    }
}

fn render(route: &Route, collected: &HashMap<String, String>) -> String {
    let mut url = String::with_capacity(route.template().as_str().len());

    for token in route.template().tokens() {
        match token {
            TemplateToken::Literal(text) => url.push_str(text),
            TemplateToken::Placeholder(name) => match substitution(route, name, collected) {
                Some(value) => url.push_str(&value),
                None => {
                    url.push('{');
                    url.push_str(name);
                    url.push('}');
                }
            },
        }
    }

    url
}

/// Encoded value for one placeholder, `None` leaves the placeholder untouched
fn substitution(route: &Route, name: &str, collected: &HashMap<String, String>) -> Option<String> {
    if !route.requires(name) {
        return None;
    }

    match route.composite() {
        Some(composite) if composite.placeholder == name => {
            Some(encode_component(&join_composite(composite, collected)))
        }
        _ => collected.get(name).map(|v| encode_component(v)),
    }
}

/// Join the composite sources, each read at substitution time; absent sources are empty
fn join_composite(composite: &CompositeField, collected: &HashMap<String, String>) -> String {
    composite
        .sources
        .iter()
        .map(|s| collected.get(s).map(String::as_str).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(&composite.separator)
}
