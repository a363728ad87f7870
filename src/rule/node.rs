use crate::enums::{HTTP_METHOD_COUNT, HttpMethod};
use crate::path::ROOT_FRAGMENT;
use crate::pattern::{SegmentKind, SegmentPattern};
use bitflags::bitflags;
use hashbrown::HashMap as FastHashMap;
use smallvec::SmallVec;
use std::fmt;

use super::HandlerEntry;

bitflags! {
    /// Methods reachable at or below a node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MethodMask: u8 {
        const GET = 1 << HttpMethod::Get as u8;
        const POST = 1 << HttpMethod::Post as u8;
        const PUT = 1 << HttpMethod::Put as u8;
        const DELETE = 1 << HttpMethod::Delete as u8;
    }
}

impl From<HttpMethod> for MethodMask {
    fn from(method: HttpMethod) -> Self {
        MethodMask::from_bits_truncate(1 << method as u8)
    }
}

type ChildIndices = SmallVec<[usize; 2]>;

pub struct RuleEdge<H> {
    pub(crate) pattern: SegmentPattern,
    pub(crate) node: RuleNode<H>,
}

impl<H> RuleEdge<H> {
    pub fn key(&self) -> &str {
        self.pattern.raw()
    }

    pub fn pattern(&self) -> &SegmentPattern {
        &self.pattern
    }

    pub fn node(&self) -> &RuleNode<H> {
        &self.node
    }
}

/// One level of a rule tree. Children keep their insertion order; the index
/// lists group them by kind so the dispatcher can apply its precedence
/// without rescanning.
pub struct RuleNode<H> {
    pub(crate) children: Vec<RuleEdge<H>>,
    pub(crate) key_index: FastHashMap<Box<str>, usize>,
    pub(crate) params: ChildIndices,
    pub(crate) optionals: ChildIndices,
    pub(crate) repetitions: ChildIndices,
    pub(crate) wildcards: ChildIndices,
    pub(crate) partial_wildcards: ChildIndices,
    pub(crate) double_wildcards: ChildIndices,
    pub(crate) handlers: [Option<HandlerEntry<H>>; HTTP_METHOD_COUNT],
    pub(crate) method_mask: MethodMask,
}

impl<H> Default for RuleNode<H> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            key_index: FastHashMap::new(),
            params: ChildIndices::new(),
            optionals: ChildIndices::new(),
            repetitions: ChildIndices::new(),
            wildcards: ChildIndices::new(),
            partial_wildcards: ChildIndices::new(),
            double_wildcards: ChildIndices::new(),
            handlers: Default::default(),
            method_mask: MethodMask::empty(),
        }
    }
}

impl<H> fmt::Debug for RuleNode<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let methods: Vec<HttpMethod> = HttpMethod::ALL
            .into_iter()
            .filter(|m| self.handlers[m.index()].is_some())
            .collect();
        let mut map = f.debug_map();
        if !methods.is_empty() {
            map.entry(&"methods", &methods);
        }
        for edge in &self.children {
            map.entry(&edge.key(), &edge.node);
        }
        map.finish()
    }
}

impl<H> RuleNode<H> {
    pub fn children(&self) -> impl Iterator<Item = &RuleEdge<H>> {
        self.children.iter()
    }

    pub fn child(&self, key: &str) -> Option<&RuleNode<H>> {
        self.key_index.get(key).map(|&i| &self.children[i].node)
    }

    pub fn handler(&self, method: HttpMethod) -> Option<&HandlerEntry<H>> {
        self.handlers[method.index()].as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    pub(crate) fn literal_child(&self, segment: &str) -> Option<&RuleNode<H>> {
        let &i = self.key_index.get(segment)?;
        let edge = &self.children[i];
        matches!(edge.pattern.kind(), SegmentKind::Literal).then_some(&edge.node)
    }

    #[inline]
    pub(crate) fn edge(&self, index: usize) -> &RuleEdge<H> {
        &self.children[index]
    }

    pub(crate) fn child_or_insert(&mut self, pattern: SegmentPattern) -> &mut RuleNode<H> {
        if let Some(&i) = self.key_index.get(pattern.raw()) {
            return &mut self.children[i].node;
        }

        let i = self.children.len();
        let bucket = match pattern.kind() {
            SegmentKind::Param { .. } => Some(&mut self.params),
            SegmentKind::Optional => Some(&mut self.optionals),
            SegmentKind::Repetition => Some(&mut self.repetitions),
            SegmentKind::Wildcard => Some(&mut self.wildcards),
            SegmentKind::PartialWildcard => Some(&mut self.partial_wildcards),
            SegmentKind::DoubleWildcard => Some(&mut self.double_wildcards),
            SegmentKind::Literal | SegmentKind::Method(_) => None,
        };
        if let Some(bucket) = bucket {
            bucket.push(i);
        }

        self.key_index.insert(pattern.raw().into(), i);
        self.children.push(RuleEdge {
            pattern,
            node: RuleNode::default(),
        });
        &mut self.children[i].node
    }

    /// Fills an empty method slot; hands the entry back if the slot is taken.
    pub(crate) fn set_handler(
        &mut self,
        method: HttpMethod,
        entry: HandlerEntry<H>,
    ) -> Result<(), HandlerEntry<H>> {
        let slot = &mut self.handlers[method.index()];
        if slot.is_some() {
            return Err(entry);
        }
        *slot = Some(entry);
        Ok(())
    }

    pub(crate) fn refresh_method_mask(&mut self) -> MethodMask {
        let mut mask = MethodMask::empty();
        for method in HttpMethod::ALL {
            if self.handlers[method.index()].is_some() {
                mask |= MethodMask::from(method);
            }
        }
        for edge in self.children.iter_mut() {
            mask |= edge.node.refresh_method_mask();
        }
        self.method_mask = mask;
        mask
    }

    fn collect_routes(&self, trail: &mut Vec<String>, out: &mut Vec<RouteDescriptor>) {
        for method in HttpMethod::ALL {
            if self.handlers[method.index()].is_some() {
                out.push(RouteDescriptor {
                    method,
                    path: format!("{ROOT_FRAGMENT}{}", trail.join("/")),
                });
            }
        }
        for edge in &self.children {
            trail.push(edge.key().to_string());
            edge.node.collect_routes(trail, out);
            trail.pop();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteDescriptor {
    pub method: HttpMethod,
    pub path: String,
}

/// One registration's worth of rules, rooted at the synthetic `/` node.
pub struct RuleTree<H> {
    pub(crate) root: RuleNode<H>,
}

impl<H> fmt::Debug for RuleTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entry(&ROOT_FRAGMENT, &self.root).finish()
    }
}

impl<H> RuleTree<H> {
    pub(crate) fn new(mut root: RuleNode<H>) -> Self {
        root.refresh_method_mask();
        Self { root }
    }

    pub fn root(&self) -> &RuleNode<H> {
        &self.root
    }

    pub fn methods(&self) -> MethodMask {
        self.root.method_mask
    }

    pub fn routes(&self) -> Vec<RouteDescriptor> {
        let mut out = Vec::new();
        self.root.collect_routes(&mut Vec::new(), &mut out);
        out
    }
}
