mod params;
mod template;

pub use params::{RequestContext, collect, parse_query};
pub use template::{missing_params, resolve};
