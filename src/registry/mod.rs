mod duplication;
mod error;
mod stats;
mod store;

pub use duplication::check_duplication;
pub use error::{RegistryError, RegistryResult};
pub use stats::RegistryMetrics;
pub use store::RuleRegistry;
