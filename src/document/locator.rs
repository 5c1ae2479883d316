//! Depth-first node lookup
//!
//! The walk is generic over [`TreeNode`] so it does not care which HTML
//! library produced the tree, and the match condition is a plain predicate
//! so class names stay out of it.

use crate::config::ClassMatch;
use scraper::ElementRef;

/// A node that can enumerate its children in document order
pub trait TreeNode: Sized {
    fn child_nodes(&self) -> Vec<Self>;
}

impl<'a> TreeNode for ElementRef<'a> {
    fn child_nodes(&self) -> Vec<Self> {
        self.children().filter_map(ElementRef::wrap).collect()
    }
}

/// Returns the first node, in pre-order, for which `predicate` holds
///
/// The root itself is tested first. Returns `None` once the whole tree has
/// been visited without a match.
///
/// # Example
///
/// ```
/// use kinoport::config::ClassMatch;
/// use kinoport::document::{has_class, locate};
/// use scraper::Html;
///
/// let html = Html::parse_document(r#"<div><p class="x">a</p><p class="x">b</p></div>"#);
/// let found = locate(html.root_element(), |el| has_class(el, "x", ClassMatch::Token)).unwrap();
/// assert_eq!(found.text().collect::<String>(), "a");
/// ```
pub fn locate<N, P>(root: N, predicate: P) -> Option<N>
where
    N: TreeNode,
    P: Fn(&N) -> bool,
{
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if predicate(&node) {
            return Some(node);
        }

        // Reversed so the leftmost child is popped next
        let mut children = node.child_nodes();
        children.reverse();
        stack.extend(children);
    }

    None
}

/// Checks whether an element's class attribute matches `wanted`
pub fn has_class(element: &ElementRef<'_>, wanted: &str, mode: ClassMatch) -> bool {
    element
        .value()
        .attr("class")
        .map(|attr| mode.matches(attr, wanted))
        .unwrap_or(false)
}

impl ClassMatch {
    /// Compares a raw class attribute value against a wanted class name
    ///
    /// In token mode a compound name such as `"item even"` requires every
    /// one of its tokens.
    pub fn matches(self, class_attr: &str, wanted: &str) -> bool {
        match self {
            Self::Token => {
                let mut wanted_tokens = wanted.split_whitespace().peekable();
                if wanted_tokens.peek().is_none() {
                    return false;
                }
                wanted_tokens.all(|w| class_attr.split_whitespace().any(|t| t == w))
            }
            Self::Substring => !wanted.is_empty() && class_attr.contains(wanted),
        }
    }
}
