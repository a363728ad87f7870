use crate::enums::HttpMethod;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How optional, repetition and partial-wildcard keys are tested against a
/// request segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PatternAnchoring {
    /// Optional keys are anchored; repetition and partial-wildcard keys may
    /// match a substring of the segment.
    #[default]
    Loose,
    /// Every pattern must match the whole segment.
    Strict,
}

/// Per-route options stored on each handler entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteOptions {
    pub requires_auth: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            requires_auth: true,
        }
    }
}

impl RouteOptions {
    pub fn public() -> Self {
        Self {
            requires_auth: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouterOptions {
    pub default_method: Option<HttpMethod>,
    pub pattern_anchoring: PatternAnchoring,
    pub requires_auth_default: bool,
    pub strip_query: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            default_method: None,
            pattern_anchoring: PatternAnchoring::default(),
            requires_auth_default: true,
            strip_query: true,
        }
    }
}

impl RouterOptions {
    pub fn builder() -> RouterOptionsBuilder {
        RouterOptionsBuilder::default()
    }

    pub(crate) fn route_defaults(&self) -> RouteOptions {
        RouteOptions {
            requires_auth: self.requires_auth_default,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct RouterOptionsBuilder {
    options: RouterOptions,
    default_method_name: Option<String>,
}

impl RouterOptionsBuilder {
    pub fn default_method(mut self, method: Option<HttpMethod>) -> Self {
        self.options.default_method = method;
        self.default_method_name = None;
        self
    }

    /// Case-insensitive method name, resolved at `build`.
    pub fn default_method_str<S: Into<String>>(mut self, name: S) -> Self {
        self.default_method_name = Some(name.into());
        self
    }

    pub fn pattern_anchoring(mut self, value: PatternAnchoring) -> Self {
        self.options.pattern_anchoring = value;
        self
    }

    pub fn requires_auth_default(mut self, value: bool) -> Self {
        self.options.requires_auth_default = value;
        self
    }

    pub fn strip_query(mut self, value: bool) -> Self {
        self.options.strip_query = value;
        self
    }

    pub fn build(self) -> Result<RouterOptions, RouterOptionsError> {
        let mut options = self.options;
        if let Some(name) = self.default_method_name {
            options.default_method = Some(parse_method_name(&name)?);
        }
        Ok(options)
    }
}

pub(crate) fn parse_method_name(name: &str) -> Result<HttpMethod, RouterOptionsError> {
    name.parse::<HttpMethod>()
        .map_err(|_| RouterOptionsError::UnknownMethod {
            name: name.to_string(),
        })
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterOptionsError {
    #[error("'{name}' is not one of GET, POST, PUT, DELETE")]
    UnknownMethod { name: String },
}
