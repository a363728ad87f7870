//! Registration helpers for static file serving. These only use the public
//! registration API, so every route they add goes through the same
//! duplication checks as hand-written rules.

use crate::enums::HttpMethod;
use crate::pattern::DOUBLE_WILDCARD;
use crate::router::{RouteOptions, Router, RouterResult};
use crate::rule::{HandlerEntry, Rule};

/// Registers one public GET route per file below `mount`, all in a single
/// rule tree. Returns the tree index.
pub fn register_files<H, I, S, F>(
    router: &Router<H>,
    mount: &str,
    files: I,
    mut make_handler: F,
) -> RouterResult<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(&str) -> H,
{
    let entries: Vec<(String, Rule<H>)> = files
        .into_iter()
        .map(|file| {
            let file = file.as_ref();
            let entry = HandlerEntry::with_options(make_handler(file), RouteOptions::public());
            (
                join_address(mount, file),
                Rule::method_entries([(HttpMethod::Get, entry)]),
            )
        })
        .collect();

    tracing::event!(tracing::Level::TRACE, operation="register_files", mount=%mount, files=entries.len() as u64);
    router.route(Rule::Literal(entries))
}

/// Registers the single-page app entry `handler` as a public GET route on
/// `root` itself and on the catch-all `root/**`, in one rule tree.
pub fn register_spa_root<H>(router: &Router<H>, root: &str, handler: H) -> RouterResult<usize> {
    let entry = HandlerEntry::with_options(handler, RouteOptions::public());
    let method = HttpMethod::Get.as_str();

    tracing::event!(tracing::Level::TRACE, operation="register_spa_root", root=%root);
    router.route(Rule::at(
        root,
        Rule::nested([
            (method, Rule::entry(entry.clone())),
            (DOUBLE_WILDCARD, Rule::at(method, Rule::entry(entry))),
        ]),
    ))
}

fn join_address(mount: &str, rest: &str) -> String {
    format!(
        "{}/{}",
        mount.trim_end_matches('/'),
        rest.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_address_avoids_double_slashes() {
        assert_eq!(join_address("/", "index.html"), "/index.html");
        assert_eq!(join_address("/static/", "/css/a.css"), "/static/css/a.css");
        assert_eq!(join_address("/app", "**"), "/app/**");
    }
}
