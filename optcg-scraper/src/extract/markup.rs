//! Small helpers over the parsed HTML tree.
//!
//! Everything here is pure and tolerant: a missing node yields `None`, never
//! an error.

use std::ops::Deref;

use scraper::{ElementRef, Node, Selector};
use url::Url;

pub use optcg_core::strip_markup as strip_tags;

/// Any node of the parsed tree: element, text, comment.
pub type DomNode<'a> = <ElementRef<'a> as Deref>::Target;

/// Compile a selector known at build time.
pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Concatenated direct child text nodes of `el`, trimmed.
pub fn own_text(el: ElementRef<'_>) -> Option<String> {
    let text: String = el
        .children()
        .filter_map(|child| child.value().as_text().map(|t| &**t))
        .collect();
    non_empty(text.trim())
}

/// Text that follows the first element matching `anchor` inside `scope`.
///
/// Covers sibling text nodes and the direct text of sibling elements. Each
/// piece is trimmed, empty pieces are dropped, and the rest joined with
/// `delimiter`.
pub fn text_after_anchor(
    scope: ElementRef<'_>,
    anchor: &Selector,
    delimiter: &str,
) -> Option<String> {
    let anchor = scope.select(anchor).next()?;
    let mut parts: Vec<&str> = Vec::new();

    for sibling in anchor.next_siblings() {
        match sibling.value() {
            Node::Text(text) => parts.push(text.trim()),
            Node::Element(_) => parts.extend(
                sibling
                    .children()
                    .filter_map(|child| child.value().as_text())
                    .map(|text| text.trim()),
            ),
            _ => {}
        }
    }

    parts.retain(|p| !p.is_empty());
    non_empty(&parts.join(delimiter))
}

/// Everything after the container's `h3` heading, with inline markup kept.
///
/// The text directly after the heading is trimmed; it and every later sibling
/// go through the same escaping as [`render_node`], so the field is
/// well-formed markup throughout.
pub fn markup_after_heading(container: ElementRef<'_>) -> Option<String> {
    let heading = container
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "h3")?;

    let mut out = String::new();
    let mut siblings = heading.next_siblings().peekable();

    if let Some(Node::Text(tail)) = siblings.peek().map(|n| n.value()) {
        out.push_str(&escape_text(tail.trim()));
        siblings.next();
    }
    for sibling in siblings {
        out.push_str(&render_node(sibling));
    }

    non_empty(out.trim())
}

/// Serialize a node back to markup. Comments and other non-content nodes
/// render as nothing.
pub fn render_node(node: DomNode<'_>) -> String {
    match node.value() {
        Node::Element(_) => ElementRef::wrap(node)
            .map(|el| el.html())
            .unwrap_or_default(),
        Node::Text(text) => escape_text(text),
        _ => String::new(),
    }
}

/// Drop any `?query` suffix and resolve `raw` against `base`.
///
/// Without a usable base the stripped value is returned unchanged.
pub fn resolve_image_url(base: Option<&Url>, raw: &str) -> String {
    let raw = raw.trim();
    let path = raw.split_once('?').map_or(raw, |(path, _)| path);
    if path.is_empty() {
        return String::new();
    }

    match base {
        Some(base) => base
            .join(path)
            .map(String::from)
            .unwrap_or_else(|_| path.to_string()),
        None => path.to_string(),
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
#[path = "../tests/markup_tests.rs"]
mod tests;
