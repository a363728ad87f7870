mod builder;
mod error;
mod input;
mod node;

pub use builder::RuleTreeBuilder;
pub use error::{RuleError, RuleResult};
pub use input::{HandlerEntry, Rule};
pub use node::{MethodMask, RouteDescriptor, RuleEdge, RuleNode, RuleTree};
