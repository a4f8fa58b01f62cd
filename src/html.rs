// src/html.rs

use regex::Regex;
use scraper::{node::Element, ElementRef, Html, Node};
use std::fmt;
use thiserror::Error;

/// How a single attribute value is matched.
#[derive(Debug, Clone)]
pub enum AttrMatch {
    Exact(String),
    Pattern(Regex),
}

/// Attribute constraints for [`locate`]. An empty filter matches any element.
#[derive(Debug, Clone, Default)]
pub struct AttrFilter {
    attrs: Vec<(String, AttrMatch)>,
}

impl AttrFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exact(mut self, name: &str, value: &str) -> Self {
        self.attrs
            .push((name.to_string(), AttrMatch::Exact(value.to_string())));
        self
    }

    pub fn pattern(mut self, name: &str, re: &Regex) -> Self {
        self.attrs
            .push((name.to_string(), AttrMatch::Pattern(re.clone())));
        self
    }

    pub fn id(self, value: &str) -> Self {
        self.exact("id", value)
    }

    pub fn class(self, value: &str) -> Self {
        self.exact("class", value)
    }

    fn matches(&self, el: &Element) -> bool {
        self.attrs.iter().all(|(name, want)| {
            let Some(value) = el.attr(name) else {
                return false;
            };
            match want {
                // class is multi-valued: either the whole attribute or one token matches
                AttrMatch::Exact(v) if name == "class" => {
                    value == v || value.split_ascii_whitespace().any(|c| c == v)
                }
                AttrMatch::Exact(v) => value == v,
                AttrMatch::Pattern(re) => re.is_match(value),
            }
        })
    }
}

impl fmt::Display for AttrFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, want)) in self.attrs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match want {
                AttrMatch::Exact(v) => write!(f, "{}={:?}", name, v)?,
                AttrMatch::Pattern(re) => write!(f, "{}=~/{}/", name, re.as_str())?,
            }
        }
        f.write_str("}")
    }
}

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("tag <{tag}> {filter} not found")]
    TagNotFound { tag: String, filter: String },

    #[error("text {0:?} not found")]
    TextNotFound(String),
}

/// Anything whose descendants can be searched: a whole document or one element.
pub trait Searchable<'a> {
    /// Descendant elements in document order, excluding the search root itself.
    fn descendant_elements(self) -> Box<dyn Iterator<Item = ElementRef<'a>> + 'a>;
}

impl<'a> Searchable<'a> for &'a Html {
    fn descendant_elements(self) -> Box<dyn Iterator<Item = ElementRef<'a>> + 'a> {
        Box::new(self.tree.root().descendants().skip(1).filter_map(ElementRef::wrap))
    }
}

impl<'a> Searchable<'a> for ElementRef<'a> {
    fn descendant_elements(self) -> Box<dyn Iterator<Item = ElementRef<'a>> + 'a> {
        Box::new((*self).descendants().skip(1).filter_map(ElementRef::wrap))
    }
}

/// Every descendant of `root` named `tag` whose attributes satisfy `filter`.
pub fn locate_all<'a>(
    root: impl Searchable<'a>,
    tag: &str,
    filter: &AttrFilter,
) -> Vec<ElementRef<'a>> {
    root.descendant_elements()
        .filter(|el| el.value().name() == tag && filter.matches(el.value()))
        .collect()
}

/// First descendant of `root` named `tag` whose attributes satisfy `filter`.
pub fn locate<'a>(
    root: impl Searchable<'a>,
    tag: &str,
    filter: &AttrFilter,
) -> Result<ElementRef<'a>, LocateError> {
    root.descendant_elements()
        .find(|el| el.value().name() == tag && filter.matches(el.value()))
        .ok_or_else(|| LocateError::TagNotFound {
            tag: tag.to_string(),
            filter: filter.to_string(),
        })
}

/// Shorthand for [`locate`] with no attribute constraints.
pub fn locate_tag<'a>(root: impl Searchable<'a>, tag: &str) -> Result<ElementRef<'a>, LocateError> {
    locate(root, tag, &AttrFilter::new())
}

/// First `tag` element that follows, in document order, the text node equal to
/// `label` inside `root`.
pub fn locate_after_text<'a>(
    root: ElementRef<'a>,
    label: &str,
    tag: &str,
) -> Result<ElementRef<'a>, LocateError> {
    let mut nodes = (*root).descendants();
    nodes
        .by_ref()
        .find(|node| matches!(node.value(), Node::Text(t) if t.trim() == label))
        .ok_or_else(|| LocateError::TextNotFound(label.to_string()))?;
    nodes
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == tag)
        .ok_or_else(|| LocateError::TagNotFound {
            tag: tag.to_string(),
            filter: format!("{{after {:?}}}", label),
        })
}

/// All text below `el`, concatenated.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}
