mod credentials;
mod route;
mod route_table;

pub use credentials::CredentialSet;
pub use route::{CompositeField, Route, RouteDefinition, RouteKind, TemplateToken, UrlTemplate};
pub use route_table::{RouteFile, RouteTable};
