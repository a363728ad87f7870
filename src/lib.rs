pub mod enums;
pub mod matcher;
pub mod path;
pub mod pattern;
pub mod registry;
pub mod router;
pub mod rule;
pub mod static_routes;
pub mod types;

pub use enums::HttpMethod;
pub use registry::{RegistryError, RegistryMetrics, RuleRegistry};
pub use router::{
    PatternAnchoring, RouteOptions, Router, RouterError, RouterOptions, RouterOptionsBuilder,
    RouterOptionsError, RouterResult,
};
pub use rule::{HandlerEntry, RouteDescriptor, Rule, RuleError, RuleTree, RuleTreeBuilder};
pub use types::{RouteMatch, RouteParams};
