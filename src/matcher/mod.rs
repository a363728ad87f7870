mod params;
pub mod resolver;

pub(crate) use params::{ParamBuffer, into_route_params};
pub use resolver::{Resolved, resolve};
