//! Load-time validation of route definitions
//!
//! A route that passes these checks can always be resolved without leaving a
//! `{placeholder}` behind, so template mismatches fail at startup instead of
//! surfacing as broken upstream URLs.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;

use crate::constants::MAX_ROUTE_NAME_LENGTH;
use crate::models::{RouteDefinition, RouteKind, UrlTemplate};

/// Regex for validating endpoint names (path segment safe)
static ROUTE_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap());

/// Route configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid route name: {0}")]
    InvalidRouteName(String),

    #[error("Duplicate route: {0}")]
    DuplicateRoute(String),

    #[error("Route '{0}' declares no parameters")]
    NoParameters(String),

    #[error("Route '{route}' declares parameter '{param}' more than once")]
    DuplicateParameter { route: String, param: String },

    #[error("Route '{route}' template uses undeclared placeholder '{placeholder}'")]
    UndeclaredPlaceholder { route: String, placeholder: String },

    #[error("Route '{route}' declares parameter '{param}' that the template never uses")]
    UnusedParameter { route: String, param: String },

    #[error("Pass-through route '{0}' must have exactly one parameter and template '{{param}}'")]
    InvalidPassThrough(String),

    #[error("Route '{route}' composite field is invalid: {reason}")]
    InvalidComposite { route: String, reason: String },

    #[error("Failed to parse routes: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Validate endpoint name format
///
/// # Examples
///
/// ```
/// use api_gateway_common::validation::validate_route_name;
///
/// assert!(validate_route_name("weather_v2").is_ok());
/// assert!(validate_route_name("../etc").is_err());
/// ```
pub fn validate_route_name(name: &str) -> Result<(), ConfigError> {
    if !ROUTE_NAME_REGEX.is_match(name) {
        return Err(ConfigError::InvalidRouteName(
            name.chars().take(MAX_ROUTE_NAME_LENGTH).collect::<String>(), // Limit error message
        ));
    }
    Ok(())
}

/// Validate a route definition before it enters a route table
pub fn validate_route(def: &RouteDefinition) -> Result<(), ConfigError> {
    validate_route_name(&def.name)?;

    if def.params.is_empty() {
        return Err(ConfigError::NoParameters(def.name.clone()));
    }

    let mut seen = HashSet::new();
    for param in &def.params {
        if !seen.insert(param.as_str()) {
            return Err(ConfigError::DuplicateParameter {
                route: def.name.clone(),
                param: param.clone(),
            });
        }
    }

    let template = UrlTemplate::parse(&def.url);

    if let Some(placeholder) = template.placeholders().find(|p| !seen.contains(p)) {
        return Err(ConfigError::UndeclaredPlaceholder {
            route: def.name.clone(),
            placeholder: placeholder.to_string(),
        });
    }

    match def.kind {
        RouteKind::PassThrough => validate_pass_through(def)?,
        RouteKind::Template => {
            validate_composite(def, &template, &seen)?;
            validate_params_used(def, &template)?;
        }
    }

    Ok(())
}

/// Every declared parameter must reach the URL, either through its own
/// placeholder or as a composite source
fn validate_params_used(
    def: &RouteDefinition,
    template: &UrlTemplate,
) -> Result<(), ConfigError> {
    let used: HashSet<&str> = template
        .placeholders()
        .chain(
            def.composite
                .iter()
                .flat_map(|c| c.sources.iter().map(String::as_str)),
        )
        .collect();

    match def.params.iter().find(|p| !used.contains(p.as_str())) {
        Some(param) => Err(ConfigError::UnusedParameter {
            route: def.name.clone(),
            param: param.clone(),
        }),
        None => Ok(()),
    }
}

fn validate_pass_through(def: &RouteDefinition) -> Result<(), ConfigError> {
    let [param] = def.params.as_slice() else {
        return Err(ConfigError::InvalidPassThrough(def.name.clone()));
    };

    if def.url != format!("{{{}}}", param) || def.composite.is_some() {
        return Err(ConfigError::InvalidPassThrough(def.name.clone()));
    }

    Ok(())
}

fn validate_composite(
    def: &RouteDefinition,
    template: &UrlTemplate,
    declared: &HashSet<&str>,
) -> Result<(), ConfigError> {
    let Some(composite) = &def.composite else {
        return Ok(());
    };

    let invalid = |reason: String| ConfigError::InvalidComposite {
        route: def.name.clone(),
        reason,
    };

    if !declared.contains(composite.placeholder.as_str()) {
        return Err(invalid(format!(
            "placeholder '{}' is not a declared parameter",
            composite.placeholder
        )));
    }

    if !template
        .placeholders()
        .any(|p| p == composite.placeholder)
    {
        return Err(invalid(format!(
            "placeholder '{}' does not appear in the template",
            composite.placeholder
        )));
    }

    if composite.sources.is_empty() {
        return Err(invalid("no source parameters".to_string()));
    }

    if let Some(source) = composite
        .sources
        .iter()
        .find(|s| !declared.contains(s.as_str()))
    {
        return Err(invalid(format!(
            "source '{}' is not a declared parameter",
            source
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_route() -> RouteDefinition {
        RouteDefinition::template(
            "login",
            "https://auth.example.com/session?credentials={password}",
            &["email", "password"],
        )
        .with_composite("password", &["email", "password"], ":")
    }

    #[test]
    fn test_validate_route_name_valid() {
        assert!(validate_route_name("ham_harama").is_ok());
        assert!(validate_route_name("Weather-2").is_ok());
        assert!(validate_route_name(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn test_validate_route_name_invalid() {
        assert!(validate_route_name("").is_err());
        assert!(validate_route_name("has space").is_err());
        assert!(validate_route_name("a/b").is_err());
        assert!(validate_route_name(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_valid_template_route() {
        let def = RouteDefinition::template(
            "geo",
            "https://geo.example.com/{lat}/{lon}",
            &["lat", "lon"],
        );
        assert!(validate_route(&def).is_ok());
    }

    #[test]
    fn test_required_param_without_placeholder_is_allowed() {
        // The composite source `email` has no placeholder of its own.
        assert!(validate_route(&login_route()).is_ok());
    }

    #[test]
    fn test_unused_parameter_rejected() {
        let def = RouteDefinition::template("r", "https://x.example.com/{a}", &["a", "b"]);

        let err = validate_route(&def).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnusedParameter { ref param, .. } if param == "b"
        ));
        assert!(err.to_string().contains("'b'"));
    }

    #[test]
    fn test_composite_sources_count_as_used() {
        assert!(validate_route(&login_route()).is_ok());

        let def = RouteDefinition::template(
            "login",
            "https://auth.example.com/session?credentials={password}",
            &["email", "password", "otp"],
        )
        .with_composite("password", &["email", "password"], ":");

        assert!(matches!(
            validate_route(&def),
            Err(ConfigError::UnusedParameter { param, .. }) if param == "otp"
        ));
    }

    #[test]
    fn test_undeclared_placeholder_rejected() {
        let def = RouteDefinition::template("geo", "https://geo.example.com/{lat}/{lon}", &["lat"]);

        let err = validate_route(&def).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UndeclaredPlaceholder { placeholder, .. } if placeholder == "lon"
        ));
    }

    #[test]
    fn test_no_parameters_rejected() {
        let def = RouteDefinition::template("static", "https://static.example.com/", &[]);
        assert!(matches!(
            validate_route(&def),
            Err(ConfigError::NoParameters(_))
        ));
    }

    #[test]
    fn test_duplicate_parameter_rejected() {
        let def = RouteDefinition::template("geo", "https://geo.example.com/{lat}", &["lat", "lat"]);
        assert!(matches!(
            validate_route(&def),
            Err(ConfigError::DuplicateParameter { .. })
        ));
    }

    #[test]
    fn test_pass_through_shape() {
        assert!(validate_route(&RouteDefinition::pass_through("open")).is_ok());

        let mut def = RouteDefinition::pass_through("open");
        def.url = "https://fixed.example.com/?u={full_url}".to_string();
        assert!(matches!(
            validate_route(&def),
            Err(ConfigError::InvalidPassThrough(_))
        ));

        let mut def = RouteDefinition::pass_through("open");
        def.params.push("extra".to_string());
        assert!(matches!(
            validate_route(&def),
            Err(ConfigError::InvalidPassThrough(_))
        ));
    }

    #[test]
    fn test_composite_placeholder_must_be_in_template() {
        let def = RouteDefinition::template(
            "login",
            "https://auth.example.com/session?user={email}",
            &["email", "password"],
        )
        .with_composite("password", &["email", "password"], ":");

        let err = validate_route(&def).unwrap_err();
        assert!(err.to_string().contains("does not appear in the template"));
    }

    #[test]
    fn test_composite_sources_must_be_declared() {
        let def = RouteDefinition::template(
            "login",
            "https://auth.example.com/session?credentials={password}",
            &["password"],
        )
        .with_composite("password", &["email", "password"], ":");

        let err = validate_route(&def).unwrap_err();
        assert!(err.to_string().contains("source 'email'"));
    }
}
