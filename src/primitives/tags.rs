//! Standard element tag names.

use crate::error::{Error, Result};

use super::element::{el, ElementBuilder};

pub const TAG_NAMES: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
    "blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col",
    "colgroup", "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt",
    "em", "embed", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "head", "header", "hr", "html", "i", "iframe", "img", "input", "ins", "kbd",
    "label", "legend", "li", "link", "main", "map", "mark", "meta", "meter", "nav", "noscript",
    "object", "ol", "optgroup", "option", "output", "p", "param", "picture", "pre", "progress",
    "q", "rp", "rt", "ruby", "s", "samp", "script", "section", "select", "small", "source",
    "span", "strong", "style", "sub", "summary", "sup", "table", "tbody", "td", "template",
    "textarea", "tfoot", "th", "thead", "time", "title", "tr", "track", "u", "ul", "var",
    "video", "wbr",
];

pub fn is_known_tag(tag: &str) -> bool {
    TAG_NAMES.iter().any(|known| known.eq_ignore_ascii_case(tag))
}

/// Builder for a standard element. Unknown tags are rejected; use
/// [`el`] directly for custom ones.
pub fn tag(name: &str) -> Result<ElementBuilder> {
    if !is_known_tag(name) {
        return Err(Error::invalid_argument(format!("unknown element tag `{name}`")));
    }
    Ok(el(name))
}
