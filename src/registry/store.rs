use crate::registry::{RegistryMetrics, RegistryResult, check_duplication};
use crate::rule::{RouteDescriptor, RuleTree};
use std::fmt;

/// Ordered, append-only list of accepted rule trees. Trees are never merged;
/// dispatch walks them in registration order.
pub struct RuleRegistry<H> {
    trees: Vec<RuleTree<H>>,
    metrics: RegistryMetrics,
}

impl<H> Default for RuleRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for RuleRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("trees", &self.trees)
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl<H> RuleRegistry<H> {
    pub fn new() -> Self {
        Self {
            trees: Vec::new(),
            metrics: RegistryMetrics::default(),
        }
    }

    /// Validates `tree` against every accepted tree and appends it. On
    /// failure the registry is left untouched.
    pub fn register(&mut self, tree: RuleTree<H>) -> RegistryResult<usize> {
        if let Err(err) = check_duplication(&self.trees, &tree) {
            self.metrics.record_rejection();
            tracing::event!(tracing::Level::DEBUG, operation="register", error=%err, "rule tree rejected");
            return Err(err);
        }

        let index = self.trees.len();
        let routes = tree.routes().len();
        self.trees.push(tree);
        self.metrics.record_insert(routes);
        tracing::event!(tracing::Level::TRACE, operation="register", index=index as u64, routes=routes as u64);
        Ok(index)
    }

    pub fn trees(&self) -> &[RuleTree<H>] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn metrics(&self) -> &RegistryMetrics {
        &self.metrics
    }

    pub fn routes(&self) -> Vec<RouteDescriptor> {
        self.trees.iter().flat_map(RuleTree::routes).collect()
    }
}
