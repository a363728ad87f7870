use crate::enums::HttpMethod;
use crate::path::{ROOT_FRAGMENT, split_address};
use crate::pattern::{SegmentKind, SegmentPattern, classify_segment};
use crate::router::{PatternAnchoring, RouterOptions};

use super::{HandlerEntry, Rule, RuleError, RuleNode, RuleResult, RuleTree};

/// Turns a `Rule` into a normalized `RuleTree`: abbreviated keys are expanded
/// into one node per fragment and bare handlers are bound to the default
/// method. The tree is not checked against other trees here.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTreeBuilder {
    default_method: Option<HttpMethod>,
    anchoring: PatternAnchoring,
}

impl RuleTreeBuilder {
    pub fn new(default_method: Option<HttpMethod>, anchoring: PatternAnchoring) -> Self {
        Self {
            default_method,
            anchoring,
        }
    }

    pub fn from_options(options: &RouterOptions) -> Self {
        Self::new(options.default_method, options.pattern_anchoring)
    }

    pub fn build<H>(&self, rule: Rule<H>) -> RuleResult<RuleTree<H>> {
        tracing::event!(tracing::Level::TRACE, operation = "build_rule_tree");
        let mut root = RuleNode::default();
        let mut trail = Vec::new();
        match rule {
            Rule::Literal(entries) => self.insert_entries(&mut root, entries, true, &mut trail)?,
            other => self.attach(&mut root, other, &mut trail)?,
        }
        Ok(RuleTree::new(root))
    }

    fn insert_entries<H>(
        &self,
        node: &mut RuleNode<H>,
        entries: Vec<(String, Rule<H>)>,
        is_root: bool,
        trail: &mut Vec<String>,
    ) -> RuleResult<()> {
        if entries.is_empty() {
            return Err(RuleError::EmptyRuleObject {
                address: display_path(trail),
            });
        }

        for (address, rule) in entries {
            let fragments = split_address(&address, is_root)?;
            // the synthetic root is `node` itself
            let fragments = match fragments.split_first() {
                Some((&first, rest)) if is_root && first == ROOT_FRAGMENT => rest,
                _ => &fragments[..],
            };

            let depth = trail.len();
            let result = self.insert_fragments(node, fragments, rule, trail);
            trail.truncate(depth);
            result?;
        }
        Ok(())
    }

    fn insert_fragments<H>(
        &self,
        node: &mut RuleNode<H>,
        fragments: &[&str],
        rule: Rule<H>,
        trail: &mut Vec<String>,
    ) -> RuleResult<()> {
        let mut current = node;
        for (i, &fragment) in fragments.iter().enumerate() {
            let is_last = i + 1 == fragments.len();

            if let SegmentKind::Method(method) = classify_segment(fragment)? {
                trail.push(fragment.to_string());
                if !is_last {
                    return Err(RuleError::MisplacedMethodKeyword {
                        address: display_path(trail),
                    });
                }
                trail.pop();
                return match rule {
                    Rule::BareHandler(entry) => bind(current, method, entry, trail),
                    _ => Err(RuleError::InvalidMethodRule {
                        method,
                        address: display_path(trail),
                    }),
                };
            }

            if trail.last().is_some_and(|k| is_double_wildcard(k)) {
                trail.push(fragment.to_string());
                return Err(RuleError::DoubleWildcardNotTerminal {
                    address: display_path(trail),
                });
            }

            let pattern = SegmentPattern::compile(fragment, self.anchoring)?;
            trail.push(fragment.to_string());
            current = current.child_or_insert(pattern);
        }

        self.attach(current, rule, trail)
    }

    fn attach<H>(
        &self,
        node: &mut RuleNode<H>,
        rule: Rule<H>,
        trail: &mut Vec<String>,
    ) -> RuleResult<()> {
        match rule {
            Rule::BareHandler(entry) => match self.default_method {
                Some(method) => bind(node, method, entry, trail),
                None => Err(RuleError::DefaultMethodNotSet {
                    address: display_path(trail),
                }),
            },
            Rule::MethodSeed(seed) => {
                if seed.is_empty() {
                    return Err(RuleError::NoRule {
                        address: display_path(trail),
                    });
                }
                for (method, entry) in seed {
                    bind(node, method, entry, trail)?;
                }
                Ok(())
            }
            Rule::Literal(entries) => self.insert_entries(node, entries, false, trail),
        }
    }
}

fn bind<H>(
    node: &mut RuleNode<H>,
    method: HttpMethod,
    entry: HandlerEntry<H>,
    trail: &[String],
) -> RuleResult<()> {
    node.set_handler(method, entry)
        .map_err(|_| RuleError::DuplicateMethod {
            method,
            address: display_path(trail),
        })
}

fn is_double_wildcard(key: &str) -> bool {
    matches!(classify_segment(key), Ok(SegmentKind::DoubleWildcard))
}

fn display_path(trail: &[String]) -> String {
    format!("{ROOT_FRAGMENT}{}", trail.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathError;
    use crate::pattern::PatternError;

    fn builder() -> RuleTreeBuilder {
        RuleTreeBuilder::default()
    }

    fn keys<H>(node: &RuleNode<H>) -> Vec<String> {
        node.children().map(|e| e.key().to_string()).collect()
    }

    #[test]
    fn abbreviated_keys_expand_into_nested_nodes() {
        let abbreviated = builder()
            .build(Rule::at("/a/b/c", Rule::methods([(HttpMethod::Get, 1)])))
            .expect("abbreviated rule should build");
        let nested = builder()
            .build(Rule::at(
                "a",
                Rule::at("b", Rule::at("c", Rule::methods([(HttpMethod::Get, 1)]))),
            ))
            .expect("nested rule should build");

        assert_eq!(abbreviated.routes(), nested.routes());
        assert_eq!(format!("{abbreviated:?}"), format!("{nested:?}"));

        let a = abbreviated.root().child("a").expect("a should exist");
        assert_eq!(keys(a), vec!["b"]);
        let c = a.child("b").and_then(|b| b.child("c")).expect("c should exist");
        assert!(c.handler(HttpMethod::Get).is_some());
        assert!(abbreviated.root().child("a/b").is_none());
    }

    #[test]
    fn leading_slash_is_optional_at_top_level() {
        let with = builder()
            .build(Rule::at("/users", Rule::methods([(HttpMethod::Get, 1)])))
            .unwrap();
        let without = builder()
            .build(Rule::at("users", Rule::methods([(HttpMethod::Get, 1)])))
            .unwrap();
        assert_eq!(with.routes(), without.routes());
        assert_eq!(with.routes()[0].path, "/users");
    }

    #[test]
    fn root_key_binds_handlers_on_root() {
        let tree = builder()
            .build(Rule::at("/", Rule::methods([(HttpMethod::Get, 1)])))
            .unwrap();
        assert!(tree.root().handler(HttpMethod::Get).is_some());
        assert!(tree.root().is_leaf());
    }

    #[test]
    fn shared_prefixes_reuse_nodes_within_one_tree() {
        let tree = builder()
            .build(Rule::nested([
                ("api/users", Rule::methods([(HttpMethod::Get, 1)])),
                ("api/posts", Rule::methods([(HttpMethod::Post, 2)])),
            ]))
            .unwrap();
        assert_eq!(keys(tree.root()), vec!["api"]);
        assert_eq!(
            keys(tree.root().child("api").unwrap()),
            vec!["users", "posts"]
        );
    }

    #[test]
    fn method_keyword_keys_bind_bare_handlers() {
        let tree = builder()
            .build(Rule::at(
                "users",
                Rule::nested([("GET", Rule::handler(1)), ("POST", Rule::handler(2))]),
            ))
            .unwrap();
        let users = tree.root().child("users").unwrap();
        assert_eq!(*users.handler(HttpMethod::Get).unwrap().handler, 1);
        assert_eq!(*users.handler(HttpMethod::Post).unwrap().handler, 2);
        assert!(users.is_leaf());
    }

    #[test]
    fn bare_handler_needs_default_method() {
        let err = builder()
            .build(Rule::at("users", Rule::handler(1)))
            .unwrap_err();
        assert_eq!(
            err,
            RuleError::DefaultMethodNotSet {
                address: "/users".to_string()
            }
        );

        let tree = RuleTreeBuilder::new(Some(HttpMethod::Put), PatternAnchoring::Loose)
            .build(Rule::at("users", Rule::handler(1)))
            .expect("default method should apply");
        assert_eq!(
            tree.routes()[0].method,
            HttpMethod::Put
        );
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let err = builder().build(Rule::<u8>::nested(Vec::<(String, _)>::new()));
        assert!(matches!(err, Err(RuleError::EmptyRuleObject { .. })));

        let err = builder().build(Rule::at("a", Rule::<u8>::nested(Vec::<(String, _)>::new())));
        match err {
            Err(RuleError::EmptyRuleObject { address }) => assert_eq!(address, "/a"),
            other => panic!("unexpected result: {other:?}"),
        }

        let err = builder().build(Rule::at("a", Rule::<u8>::methods(Vec::new())));
        assert!(matches!(err, Err(RuleError::NoRule { .. })));
    }

    #[test]
    fn malformed_keys_surface_path_and_pattern_errors() {
        let cases: Vec<(&str, RuleError)> = vec![
            (
                "a b",
                RuleError::Path(PathError::IncludesSpace {
                    address: "a b".into(),
                }),
            ),
            (
                "a//b",
                RuleError::Path(PathError::DoubleSlash {
                    address: "a//b".into(),
                }),
            ),
            (
                "a/b:c",
                RuleError::Pattern(PatternError::InvalidColon {
                    segment: "b:c".into(),
                }),
            ),
            (
                "?a",
                RuleError::Pattern(PatternError::InvalidQuestion {
                    segment: "?a".into(),
                }),
            ),
            (
                "+a",
                RuleError::Pattern(PatternError::InvalidPlus {
                    segment: "+a".into(),
                }),
            ),
        ];

        for (address, expected) in cases {
            let err = builder()
                .build(Rule::at(address, Rule::methods([(HttpMethod::Get, 0)])))
                .unwrap_err();
            assert_eq!(err, expected, "address {address}");
        }
    }

    #[test]
    fn double_wildcard_must_end_its_branch() {
        let err = builder()
            .build(Rule::at("static/**/x", Rule::methods([(HttpMethod::Get, 0)])))
            .unwrap_err();
        assert!(matches!(err, RuleError::DoubleWildcardNotTerminal { .. }));

        let err = builder()
            .build(Rule::at(
                "static/**",
                Rule::at("x", Rule::methods([(HttpMethod::Get, 0)])),
            ))
            .unwrap_err();
        assert!(matches!(err, RuleError::DoubleWildcardNotTerminal { .. }));

        builder()
            .build(Rule::at("static/**", Rule::at("GET", Rule::handler(0))))
            .expect("method keys below ** are fine");
    }

    #[test]
    fn method_keyword_must_be_terminal_and_bare() {
        let err = builder()
            .build(Rule::at("GET/users", Rule::handler(0)))
            .unwrap_err();
        assert!(matches!(err, RuleError::MisplacedMethodKeyword { .. }));

        let err = builder()
            .build(Rule::at("users/GET", Rule::methods([(HttpMethod::Get, 0)])))
            .unwrap_err();
        assert!(matches!(
            err,
            RuleError::InvalidMethodRule {
                method: HttpMethod::Get,
                ..
            }
        ));
    }

    #[test]
    fn same_method_twice_in_one_tree_is_rejected() {
        let err = builder()
            .build(Rule::nested([
                ("a", Rule::methods([(HttpMethod::Get, 1)])),
                ("/a", Rule::methods([(HttpMethod::Get, 2)])),
            ]))
            .unwrap_err();
        assert_eq!(
            err,
            RuleError::DuplicateMethod {
                method: HttpMethod::Get,
                address: "/a".into()
            }
        );
    }

    #[test]
    fn method_mask_covers_subtree() {
        let tree = builder()
            .build(Rule::nested([
                ("a", Rule::methods([(HttpMethod::Get, 1)])),
                ("b/c", Rule::methods([(HttpMethod::Delete, 2)])),
            ]))
            .unwrap();
        assert!(tree.methods().contains(crate::rule::MethodMask::GET));
        assert!(tree.methods().contains(crate::rule::MethodMask::DELETE));
        assert!(!tree.methods().contains(crate::rule::MethodMask::POST));
    }
}
