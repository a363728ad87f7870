use crate::enums::HttpMethod;
use crate::router::RouteOptions;
use std::fmt;
use std::sync::Arc;

/// Handler bound to one method slot, with its per-route options.
pub struct HandlerEntry<H> {
    pub handler: Arc<H>,
    pub options: RouteOptions,
}

impl<H> HandlerEntry<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
            options: RouteOptions::default(),
        }
    }

    pub fn with_options(handler: H, options: RouteOptions) -> Self {
        Self {
            handler: Arc::new(handler),
            options,
        }
    }
}

impl<H> Clone for HandlerEntry<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            options: self.options,
        }
    }
}

impl<H> fmt::Debug for HandlerEntry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Registration input.
///
/// `Literal` maps URI keys (`"users"`, `"a/b/c"`, `":id"`, ...) to nested
/// rules; a key spelled exactly like a method keyword (`"GET"`) binds a
/// `BareHandler` to that method instead. `MethodSeed` binds handlers by
/// method. `BareHandler` is bound to the router's default method.
#[derive(Debug)]
pub enum Rule<H> {
    Literal(Vec<(String, Rule<H>)>),
    MethodSeed(Vec<(HttpMethod, HandlerEntry<H>)>),
    BareHandler(HandlerEntry<H>),
}

impl<H> Rule<H> {
    pub fn nested<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Rule<H>)>,
        K: Into<String>,
    {
        Rule::Literal(
            entries
                .into_iter()
                .map(|(key, rule)| (key.into(), rule))
                .collect(),
        )
    }

    /// Single-key shorthand for `Rule::nested([(address, rule)])`.
    pub fn at<K: Into<String>>(address: K, rule: Rule<H>) -> Self {
        Rule::Literal(vec![(address.into(), rule)])
    }

    pub fn methods<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (HttpMethod, H)>,
    {
        Rule::MethodSeed(
            entries
                .into_iter()
                .map(|(method, handler)| (method, HandlerEntry::new(handler)))
                .collect(),
        )
    }

    pub fn method_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (HttpMethod, HandlerEntry<H>)>,
    {
        Rule::MethodSeed(entries.into_iter().collect())
    }

    pub fn handler(handler: H) -> Self {
        Rule::BareHandler(HandlerEntry::new(handler))
    }

    pub fn entry(entry: HandlerEntry<H>) -> Self {
        Rule::BareHandler(entry)
    }
}
