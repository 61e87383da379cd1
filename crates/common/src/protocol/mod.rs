mod request;
mod response;

pub use request::ResolvedTarget;
pub use response::{ErrorBody, UpstreamResponse};
