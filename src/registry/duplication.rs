use crate::path::ROOT_FRAGMENT;
use crate::pattern::{SegmentKind, SegmentPattern, optionals_overlap, repetition_variants};
use crate::rule::{RuleNode, RuleTree};
use hashbrown::{HashMap as FastHashMap, HashSet as FastHashSet};

use super::{RegistryError, RegistryResult};

type Trail<'a> = Vec<&'a str>;
type Siblings<'a> = Vec<&'a SegmentPattern>;

/// Rejects `candidate` if, under any parent path it shares with the accepted
/// trees, the union of sibling keys becomes ambiguous. Only parents present
/// in `candidate` are checked; the accepted trees are consistent among
/// themselves.
#[tracing::instrument(level = "trace", skip_all, fields(existing = existing.len() as u64))]
pub fn check_duplication<H>(existing: &[RuleTree<H>], candidate: &RuleTree<H>) -> RegistryResult<()> {
    let mut order: Vec<Trail<'_>> = Vec::new();
    let mut groups: FastHashMap<Trail<'_>, Siblings<'_>> = FastHashMap::new();
    let mut trail = Trail::new();

    collect_parents(candidate.root(), &mut trail, &mut order, &mut groups);
    for tree in existing {
        merge_siblings(tree.root(), &mut trail, &mut groups);
    }
    merge_siblings(candidate.root(), &mut trail, &mut groups);

    for parent in &order {
        if let Some(siblings) = groups.get(parent) {
            check_siblings(parent, siblings)?;
        }
    }
    Ok(())
}

fn collect_parents<'a, H>(
    node: &'a RuleNode<H>,
    trail: &mut Trail<'a>,
    order: &mut Vec<Trail<'a>>,
    groups: &mut FastHashMap<Trail<'a>, Siblings<'a>>,
) {
    if node.is_leaf() {
        return;
    }
    groups.insert(trail.clone(), Siblings::new());
    order.push(trail.clone());
    for edge in node.children() {
        trail.push(edge.key());
        collect_parents(edge.node(), trail, order, groups);
        trail.pop();
    }
}

fn merge_siblings<'a, H>(
    node: &'a RuleNode<H>,
    trail: &mut Trail<'a>,
    groups: &mut FastHashMap<Trail<'a>, Siblings<'a>>,
) {
    // parents of the candidate are prefix-closed, so nothing below an
    // unknown parent can matter
    let Some(siblings) = groups.get_mut(trail.as_slice()) else {
        return;
    };
    for edge in node.children() {
        if !siblings.iter().any(|p| p.raw() == edge.key()) {
            siblings.push(edge.pattern());
        }
    }
    for edge in node.children() {
        trail.push(edge.key());
        merge_siblings(edge.node(), trail, groups);
        trail.pop();
    }
}

fn check_siblings(parent: &[&str], siblings: &[&SegmentPattern]) -> RegistryResult<()> {
    check_colon(parent, siblings)?;
    check_question(parent, siblings)?;
    check_plus(parent, siblings)?;
    check_asterisk(parent, siblings)
}

fn check_colon(parent: &[&str], siblings: &[&SegmentPattern]) -> RegistryResult<()> {
    let params: Vec<String> = siblings
        .iter()
        .filter(|p| matches!(p.kind(), SegmentKind::Param { .. }))
        .map(|p| p.raw().to_string())
        .collect();
    if params.len() > 1 {
        return Err(RegistryError::DuplicatedColon {
            parent: display_parent(parent),
            keys: params,
        });
    }
    Ok(())
}

fn check_question(parent: &[&str], siblings: &[&SegmentPattern]) -> RegistryResult<()> {
    for optional in siblings
        .iter()
        .filter(|p| matches!(p.kind(), SegmentKind::Optional))
    {
        for other in siblings.iter().filter(|p| p.raw() != optional.raw()) {
            let overlaps = optional.is_match(other.raw())
                || (matches!(other.kind(), SegmentKind::Optional)
                    && optionals_overlap(optional.raw(), other.raw()));
            if overlaps {
                return Err(RegistryError::DuplicatedQuestion {
                    parent: display_parent(parent),
                    pattern: optional.raw().to_string(),
                    conflicts_with: other.raw().to_string(),
                });
            }
        }
    }
    Ok(())
}

fn check_plus(parent: &[&str], siblings: &[&SegmentPattern]) -> RegistryResult<()> {
    let mut seen: FastHashSet<String> = siblings
        .iter()
        .filter(|p| !matches!(p.kind(), SegmentKind::Repetition))
        .map(|p| p.raw().to_string())
        .collect();

    for repetition in siblings
        .iter()
        .filter(|p| matches!(p.kind(), SegmentKind::Repetition))
    {
        let variants = repetition_variants(repetition.raw());
        if let Some(hit) = variants.iter().find(|v| seen.contains(v.as_str())) {
            return Err(RegistryError::DuplicatedPlus {
                parent: display_parent(parent),
                pattern: repetition.raw().to_string(),
                conflicts_with: hit.clone(),
            });
        }
        seen.extend(variants);
    }
    Ok(())
}

fn check_asterisk(parent: &[&str], siblings: &[&SegmentPattern]) -> RegistryResult<()> {
    let starred: Vec<String> = siblings
        .iter()
        .filter(|p| p.raw().contains('*'))
        .map(|p| p.raw().to_string())
        .collect();
    if starred.len() > 1 {
        return Err(RegistryError::DuplicatedAsterisk {
            parent: display_parent(parent),
            keys: starred,
        });
    }
    Ok(())
}

fn display_parent(parent: &[&str]) -> String {
    format!("{ROOT_FRAGMENT}{}", parent.join("/"))
}
