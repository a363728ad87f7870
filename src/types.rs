use crate::router::RouteOptions;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub type RouteParams = HashMap<String, String>;
pub type CapturedParam = (String, String);

/// A successful dispatch: the handler, its options and the captured path
/// parameters.
pub struct RouteMatch<H> {
    pub handler: Arc<H>,
    pub options: RouteOptions,
    pub params: RouteParams,
    /// Registration index of the tree that matched.
    pub tree_index: usize,
}

impl<H> Clone for RouteMatch<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            options: self.options,
            params: self.params.clone(),
            tree_index: self.tree_index,
        }
    }
}

impl<H> fmt::Debug for RouteMatch<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("options", &self.options)
            .field("params", &self.params)
            .field("tree_index", &self.tree_index)
            .finish_non_exhaustive()
    }
}
