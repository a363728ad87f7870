mod errors;
mod options;
mod service;

pub use errors::{RouterError, RouterResult};
pub(crate) use options::parse_method_name;
pub use options::{
    PatternAnchoring, RouteOptions, RouterOptions, RouterOptionsBuilder, RouterOptionsError,
};
pub use service::Router;
