//! In-memory document model the binder and renderer operate on.
//!
//! Responsibilities:
//! - Hold elements in an arena addressed by [`ElementId`].
//! - Answer simple selector queries in document order.
//! - Expose the element state the SDK reads and writes: attributes, classes,
//!   text, inner HTML, the disabled flag and input values.
//!
//! Does NOT handle:
//! - HTML parsing or serialization of the tree.
//! - Selector combinators (descendant, child, sibling).
//!
//! Invariants:
//! - Element ids are only valid for the document that issued them.
//! - The root element always exists and has id `ElementId(0)`.

mod selector;

use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

pub use selector::Selector;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    text: String,
    inner_html: Option<String>,
    value: String,
    disabled: bool,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Current value of an input, textarea or select.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text content. Any rendered inner HTML is discarded.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.inner_html = None;
    }

    pub fn inner_html(&self) -> Option<&str> {
        self.inner_html.as_deref()
    }

    pub fn set_inner_html(&mut self, html: impl Into<String>) {
        self.inner_html = Some(html.into());
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

/// A tree of elements rooted at a `body` element.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            elements: vec![Element::new("body")],
        }
    }

    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Insert `element` as the last child of `parent`.
    pub fn append(&mut self, parent: ElementId, mut element: Element) -> ElementId {
        let id = ElementId(self.elements.len());
        element.parent = Some(parent);
        element.children.clear();
        self.elements.push(element);
        self.elements[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// `id` and its descendants in document (pre-)order.
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(el) = self.get(next) {
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    /// Every element carrying attribute `name`, in document order.
    pub fn elements_with_attribute(&self, name: &str) -> Vec<ElementId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self[*id].has_attribute(name))
            .collect()
    }

    /// First element in the document matching `selector`.
    pub fn query_selector(&self, selector: &str) -> Result<Option<ElementId>> {
        self.query_selector_within(self.root(), selector)
    }

    /// First element in the subtree under `scope` (excluding `scope`) matching `selector`.
    pub fn query_selector_within(&self, scope: ElementId, selector: &str) -> Result<Option<ElementId>> {
        let selector: Selector = selector.parse()?;
        let candidates = self.descendants(scope);
        let skip = usize::from(scope != self.root());
        Ok(candidates
            .into_iter()
            .skip(skip)
            .find(|id| selector.matches(&self[*id])))
    }

    /// The element following `id` under the same parent.
    pub fn next_sibling(&self, id: ElementId) -> Option<ElementId> {
        let parent = self.get(id)?.parent?;
        let siblings = &self[parent].children;
        let position = siblings.iter().position(|c| *c == id)?;
        siblings.get(position + 1).copied()
    }

    /// Values of named descendants of `form`, like the browser's form data.
    ///
    /// Disabled controls are skipped. When several controls share a name the
    /// first one wins.
    pub fn form_data(&self, form: ElementId) -> BTreeMap<String, String> {
        let mut data = BTreeMap::new();
        for id in self.descendants(form).into_iter().skip(1) {
            let el = &self[id];
            if el.disabled || !matches!(el.tag.as_str(), "input" | "textarea" | "select") {
                continue;
            }
            if let Some(name) = el.attribute("name") {
                data.entry(name.to_string())
                    .or_insert_with(|| el.value.clone());
            }
        }
        data
    }
}

impl Index<ElementId> for Document {
    type Output = Element;

    fn index(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }
}

impl IndexMut<ElementId> for Document {
    fn index_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }
}
