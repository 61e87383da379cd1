//! Handler modules
//!
//! HTTP handlers mounted by [`crate::build_router`].

pub mod gateway;
pub mod landing;


pub use gateway::{handle_gateway, process_request};
pub use landing::handle_index;
