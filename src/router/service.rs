use crate::enums::HttpMethod;
use crate::matcher::resolve;
use crate::path::split_request_path;
use crate::registry::{RegistryMetrics, RuleRegistry};
use crate::router::{
    RouteOptions, RouterError, RouterOptions, RouterResult, parse_method_name,
};
use crate::rule::{HandlerEntry, RouteDescriptor, Rule, RuleTreeBuilder};
use crate::types::RouteMatch;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

struct RouterState<H> {
    registry: RuleRegistry<H>,
    options: RouterOptions,
}

/// Registration and dispatch front end over a `RuleRegistry`.
///
/// Registration is meant for the setup phase; dispatch only takes the read
/// lock and can run from any number of threads.
pub struct Router<H> {
    inner: RwLock<RouterState<H>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<H> fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.inner.read();
        f.debug_struct("Router")
            .field("options", &guard.options)
            .field("registry", &guard.registry)
            .finish()
    }
}

impl<H> Router<H> {
    pub fn new(options: Option<RouterOptions>) -> Self {
        Self {
            inner: RwLock::new(RouterState {
                registry: RuleRegistry::new(),
                options: options.unwrap_or_default(),
            }),
        }
    }

    /// Builds one rule tree from `rule` and appends it after checking it
    /// against every registered tree. Returns the tree's index.
    pub fn route(&self, rule: Rule<H>) -> RouterResult<usize> {
        let builder = RuleTreeBuilder::from_options(&self.inner.read().options);
        let tree = builder.build(rule).inspect_err(|err| {
            tracing::event!(tracing::Level::DEBUG, operation="route", error=%err, "rule rejected");
        })?;

        let mut guard = self.inner.write();
        Ok(guard.registry.register(tree)?)
    }

    /// Registers a single handler. `options` falls back to the router's
    /// `requires_auth_default`.
    pub fn add(
        &self,
        method: HttpMethod,
        address: &str,
        handler: H,
        options: Option<RouteOptions>,
    ) -> RouterResult<usize> {
        tracing::event!(tracing::Level::TRACE, operation="add", method=%method, address=%address);
        let options = match options {
            Some(options) => options,
            None => self.inner.read().options.route_defaults(),
        };
        let entry = HandlerEntry::with_options(handler, options);
        self.route(Rule::at(address, Rule::method_entries([(method, entry)])))
    }

    pub fn get(&self, address: &str, handler: H) -> RouterResult<usize> {
        self.add(HttpMethod::Get, address, handler, None)
    }

    pub fn post(&self, address: &str, handler: H) -> RouterResult<usize> {
        self.add(HttpMethod::Post, address, handler, None)
    }

    pub fn put(&self, address: &str, handler: H) -> RouterResult<usize> {
        self.add(HttpMethod::Put, address, handler, None)
    }

    pub fn delete(&self, address: &str, handler: H) -> RouterResult<usize> {
        self.add(HttpMethod::Delete, address, handler, None)
    }

    /// Sets the method bare handlers are bound to. The name is matched
    /// case-insensitively; `None` clears it.
    pub fn set_default_method(&self, name: Option<&str>) -> RouterResult<()> {
        let method = name.map(parse_method_name).transpose()?;
        self.inner.write().options.default_method = method;
        Ok(())
    }

    pub fn default_method(&self) -> Option<HttpMethod> {
        self.inner.read().options.default_method
    }

    #[tracing::instrument(level = "trace", skip(self, method, path), fields(method=%method, path=%path))]
    pub fn find(&self, method: HttpMethod, path: &str) -> Option<RouteMatch<H>> {
        let guard = self.inner.read();
        let segments = split_request_path(path, guard.options.strip_query);

        let found = resolve(guard.registry.trees(), method, &segments).map(|resolved| {
            RouteMatch {
                handler: Arc::clone(&resolved.entry.handler),
                options: resolved.entry.options,
                params: resolved.params,
                tree_index: resolved.tree_index,
            }
        });

        if found.is_none() {
            tracing::event!(tracing::Level::TRACE, operation="find", trees=guard.registry.len() as u64, "no route matched");
        }
        found
    }

    /// Like `find`, with the method given as a request-line token. A missing
    /// or unknown method is an error; an unmatched path is `Ok(None)`.
    pub fn dispatch(&self, method: &str, path: &str) -> RouterResult<Option<RouteMatch<H>>> {
        if method.trim().is_empty() {
            return Err(RouterError::MissingMethod);
        }
        let method = method
            .parse::<HttpMethod>()
            .map_err(|_| RouterError::InvalidMethod {
                method: method.to_string(),
            })?;
        Ok(self.find(method, path))
    }

    pub fn routes(&self) -> Vec<RouteDescriptor> {
        self.inner.read().registry.routes()
    }

    pub fn tree_count(&self) -> usize {
        self.inner.read().registry.len()
    }

    pub fn metrics(&self) -> RegistryMetrics {
        self.inner.read().registry.metrics().clone()
    }

    pub fn options(&self) -> RouterOptions {
        self.inner.read().options.clone()
    }
}
