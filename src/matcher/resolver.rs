use crate::enums::HttpMethod;
use crate::matcher::{ParamBuffer, into_route_params};
use crate::pattern::{DOUBLE_WILDCARD, SegmentKind, WILDCARD};
use crate::rule::{HandlerEntry, MethodMask, RuleNode, RuleTree};
use crate::types::RouteParams;

/// Handler found by `resolve`, borrowed from the tree it lives in.
#[derive(Debug)]
pub struct Resolved<'t, H> {
    pub tree_index: usize,
    pub entry: &'t HandlerEntry<H>,
    pub params: RouteParams,
}

/// Walks `trees` in order and returns the first one whose traversal of
/// `segments` ends on a node holding a handler for `method`.
pub fn resolve<'t, H>(
    trees: &'t [RuleTree<H>],
    method: HttpMethod,
    segments: &[&str],
) -> Option<Resolved<'t, H>> {
    let wanted = MethodMask::from(method);
    let mut params = ParamBuffer::new();

    for (tree_index, tree) in trees.iter().enumerate() {
        if !tree.methods().contains(wanted) {
            continue;
        }

        params.clear();
        let Some(node) = walk(tree.root(), wanted, segments, &mut params) else {
            continue;
        };

        if let Some(entry) = node.handler(method) {
            tracing::event!(tracing::Level::TRACE, operation="resolve", tree_index=tree_index as u64, params=params.len() as u64);
            return Some(Resolved {
                tree_index,
                entry,
                params: into_route_params(std::mem::take(&mut params)),
            });
        }
    }

    None
}

fn walk<'t, H>(
    root: &'t RuleNode<H>,
    wanted: MethodMask,
    segments: &[&str],
    params: &mut ParamBuffer,
) -> Option<&'t RuleNode<H>> {
    let mut node = root;

    for (i, &segment) in segments.iter().enumerate() {
        node = match step(node, segment, params) {
            Some(child) => child,
            None => return consume_rest(node, &segments[i..], params),
        };

        // the handler can only sit below this point now
        if !node.method_mask.contains(wanted) {
            return None;
        }
    }

    Some(node)
}

/// Tries the matching strategies in precedence order and advances into the
/// first child that accepts `segment`.
fn step<'t, H>(
    node: &'t RuleNode<H>,
    segment: &str,
    params: &mut ParamBuffer,
) -> Option<&'t RuleNode<H>> {
    if let Some(child) = node.literal_child(segment) {
        return Some(child);
    }

    if let Some(&i) = node.params.first() {
        let edge = node.edge(i);
        if let SegmentKind::Param { name } = edge.pattern.kind() {
            params.push((name.to_string(), segment.to_string()));
            return Some(&edge.node);
        }
    }

    for indices in [&node.optionals, &node.repetitions] {
        if let Some(child) = first_pattern_match(node, indices, segment, params) {
            return Some(child);
        }
    }

    if let Some(&i) = node.wildcards.first() {
        params.push((WILDCARD.to_string(), segment.to_string()));
        return Some(&node.edge(i).node);
    }

    first_pattern_match(node, &node.partial_wildcards, segment, params)
}

fn first_pattern_match<'t, H>(
    node: &'t RuleNode<H>,
    indices: &[usize],
    segment: &str,
    params: &mut ParamBuffer,
) -> Option<&'t RuleNode<H>> {
    let edge = indices
        .iter()
        .map(|&i| node.edge(i))
        .find(|edge| edge.pattern.is_match(segment))?;
    params.push((edge.key().to_string(), segment.to_string()));
    Some(&edge.node)
}

/// A `**` child swallows every remaining segment and ends the traversal.
fn consume_rest<'t, H>(
    node: &'t RuleNode<H>,
    rest: &[&str],
    params: &mut ParamBuffer,
) -> Option<&'t RuleNode<H>> {
    let &i = node.double_wildcards.first()?;
    params.push((DOUBLE_WILDCARD.to_string(), rest.join("/")));
    Some(&node.edge(i).node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::split_request_path;
    use crate::router::PatternAnchoring;
    use crate::rule::{Rule, RuleTreeBuilder};

    fn trees(rules: Vec<Rule<&'static str>>) -> Vec<RuleTree<&'static str>> {
        let builder = RuleTreeBuilder::new(Some(HttpMethod::Get), PatternAnchoring::Loose);
        rules
            .into_iter()
            .map(|r| builder.build(r).expect("rule should build"))
            .collect()
    }

    fn run(
        trees: &[RuleTree<&'static str>],
        method: HttpMethod,
        path: &str,
    ) -> Option<(&'static str, RouteParams)> {
        let segments = split_request_path(path, true);
        resolve(trees, method, &segments).map(|r| (*r.entry.handler, r.params))
    }

    #[test]
    fn literal_beats_parameter_beats_wildcard() {
        let trees = trees(vec![Rule::at(
            "items",
            Rule::nested([
                ("*", Rule::handler("wild")),
                (":id", Rule::handler("param")),
                ("new", Rule::handler("literal")),
            ]),
        )]);

        assert_eq!(run(&trees, HttpMethod::Get, "/items/new").unwrap().0, "literal");
        let (h, params) = run(&trees, HttpMethod::Get, "/items/7").unwrap();
        assert_eq!(h, "param");
        assert_eq!(params.get("id").map(String::as_str), Some("7"));
    }

    #[test]
    fn wildcard_used_when_nothing_else_fits() {
        let trees = trees(vec![Rule::at(
            "items",
            Rule::nested([("ab?c", Rule::handler("opt")), ("*", Rule::handler("wild"))]),
        )]);

        let (h, params) = run(&trees, HttpMethod::Get, "/items/ac").unwrap();
        assert_eq!(h, "opt");
        assert_eq!(params.get("ab?c").map(String::as_str), Some("ac"));

        let (h, params) = run(&trees, HttpMethod::Get, "/items/zzz").unwrap();
        assert_eq!(h, "wild");
        assert_eq!(params.get("*").map(String::as_str), Some("zzz"));
    }

    #[test]
    fn double_wildcard_consumes_the_rest() {
        let trees = trees(vec![Rule::at("assets/**", Rule::handler("rest"))]);

        let (_, params) = run(&trees, HttpMethod::Get, "/assets/css/site/main.css").unwrap();
        assert_eq!(
            params.get("**").map(String::as_str),
            Some("css/site/main.css")
        );
        assert!(run(&trees, HttpMethod::Get, "/assets").is_none());
    }

    #[test]
    fn failed_tree_falls_through_to_the_next() {
        let trees = trees(vec![
            Rule::at("a/:x/c", Rule::handler("first")),
            Rule::at("a/b/d", Rule::handler("second")),
        ]);

        // first tree binds :x and then misses on `d`; its captures are dropped
        let (h, params) = run(&trees, HttpMethod::Get, "/a/b/d").unwrap();
        assert_eq!(h, "second");
        assert!(params.is_empty());
    }

    #[test]
    fn first_structural_match_wins_without_backtracking() {
        let trees = trees(vec![Rule::at(
            "a",
            Rule::nested([("b", Rule::handler("static")), (":x/c", Rule::handler("deep"))]),
        )]);

        // `b` is taken at the second level, so `/a/b/c` cannot reach `:x/c`
        assert!(run(&trees, HttpMethod::Get, "/a/b/c").is_none());
        assert_eq!(run(&trees, HttpMethod::Get, "/a/z/c").unwrap().0, "deep");
    }

    #[test]
    fn method_must_be_present_on_the_final_node() {
        let trees = trees(vec![Rule::at("a", Rule::handler("get"))]);
        assert!(run(&trees, HttpMethod::Post, "/a").is_none());
        assert!(run(&trees, HttpMethod::Get, "/a/b").is_none());
        assert!(run(&trees, HttpMethod::Get, "/").is_none());
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let trees: Vec<RuleTree<&'static str>> = Vec::new();
        assert!(run(&trees, HttpMethod::Get, "/").is_none());
    }
}
