//! Element Builder - declarative element construction.
//!
//! Attributes are passed straight through to the host. Children are
//! appended in order; component children hand their cleanup to the
//! lifecycle registry.
//!
//! # Example
//!
//! ```ignore
//! use spark_nav::primitives::{el, Child};
//!
//! let menu = el("ul")
//!     .attr("class", "menu")
//!     .parent(ui.document().body())
//!     .child(el("li").selectable(true).child("Start").build(&ui)?)
//!     .child(el("li").selectable(true).child("Options").build(&ui)?)
//!     .build(&ui)?;
//! ```

use std::fmt;

use crate::error::Result;
use crate::pipeline::Ui;
use crate::state::set_selectable;
use crate::types::NodeId;

use super::types::Child;

/// Start building a `tag` element.
pub fn el(tag: impl Into<String>) -> ElementBuilder {
    ElementBuilder::new(tag)
}

pub struct ElementBuilder {
    tag: String,
    attrs: Vec<(String, String)>,
    style: Vec<(String, String)>,
    selectable: bool,
    parent: Option<NodeId>,
    children: Vec<Child>,
    node_ref: Option<Box<dyn FnOnce(NodeId)>>,
}

impl ElementBuilder {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            style: Vec::new(),
            selectable: false,
            parent: None,
            children: Vec::new(),
            node_ref: None,
        }
    }

    /// Set an attribute. Later values for the same name win.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Add an inline style declaration. Property names may be camelCase;
    /// they are written kebab-case. Replaces any `style` set with [`attr`].
    ///
    /// [`attr`]: ElementBuilder::attr
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.push((property.into(), value.into()));
        self
    }

    /// Tag as a navigation candidate with the default threshold.
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Append the element to `parent` before its children are rendered.
    pub fn parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Child>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Called with the finished element.
    pub fn node_ref(mut self, callback: impl FnOnce(NodeId) + 'static) -> Self {
        self.node_ref = Some(Box::new(callback));
        self
    }

    /// Create the element. If any step fails the half-built element is
    /// detached and freed before the error is returned.
    pub fn build(self, ui: &Ui) -> Result<NodeId> {
        let element = ui.document().create_element(&self.tag);
        match self.assemble(ui, element) {
            Ok(()) => Ok(element),
            Err(err) => {
                ui.discard(element);
                Err(err)
            }
        }
    }

    fn assemble(self, ui: &Ui, element: NodeId) -> Result<()> {
        let doc = ui.document();
        for (name, value) in &self.attrs {
            doc.set_attribute(element, name, value)?;
        }
        if !self.style.is_empty() {
            doc.set_attribute(element, "style", &inline_style(&self.style))?;
        }
        if self.selectable {
            set_selectable(doc, element, true)?;
        }
        if let Some(parent) = self.parent {
            doc.append_child(parent, element)?;
        }
        for child in self.children {
            render_child(ui, element, child)?;
        }
        if let Some(callback) = self.node_ref {
            callback(element);
        }
        Ok(())
    }
}

impl fmt::Debug for ElementBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementBuilder")
            .field("tag", &self.tag)
            .field("attrs", &self.attrs)
            .field("style", &self.style)
            .field("selectable", &self.selectable)
            .field("parent", &self.parent)
            .field("children", &self.children.len())
            .finish()
    }
}

/// `[("fontSize", "12px")]` becomes `"font-size: 12px;"`.
fn inline_style(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(property, value)| format!("{}: {value};", kebab_case(property)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `backgroundColor` -> `background-color`. A run of capitals counts as
/// one word, so `innerHTML` -> `inner-html`.
fn kebab_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev_upper = i > 0 && chars[i - 1].is_ascii_uppercase();
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if i > 0 && (!prev_upper || next_lower) {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Append `child` under `parent`.
pub fn render_child(ui: &Ui, parent: NodeId, child: Child) -> Result<()> {
    let doc = ui.document();
    match child {
        Child::Text(text) => {
            let node = doc.create_text(&text);
            doc.append_child(parent, node)
        }
        Child::Element(node) => doc.append_child(parent, node),
        Child::Component(component) => ui.attach_component(parent, component).map(|_| ()),
        Child::Lazy(produce) => render_child(ui, parent, produce(parent)),
        Child::Many(children) => {
            for child in children {
                render_child(ui, parent, child)?;
            }
            Ok(())
        }
    }
}
