// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless markup for a carousel: the element tree a DOM host would build.
//!
//! [`Markup`] reproduces the structure hosts style against:
//!
//! ```text
//! div.carousel-container            (outer wrapper)
//!   div.carousel                    (fixed-size viewport)
//!     <root>                        (the host's container)
//!       div.carousel-items-list     (the strip; `left` and `transition` styles)
//!         <slide>.carousel-item     (one per child; `.active` on one, `.clone` on clones)
//!   div.carousel-nav
//!     div.carousel-buttons
//!       button.carousel-prev[data-action=prev]
//!       button.carousel-next[data-action=next]
//!     div.carousel-dots
//!       span.carousel-dot-item[data-action=moveAt][data-order=i]
//! ```
//!
//! The tree is a rendering of the engine's state: call [`Markup::sync`] after
//! operations or [`Carousel::advance_to`] and patch the real document from it.
//!
//! ```rust
//! use kurbo::Size;
//! use understory_carousel::{Carousel, CarouselOptions, Markup, RootElement, SlideElement};
//!
//! let root = RootElement::new("div", Size::new(300.0, 200.0))
//!     .with_child(SlideElement::new("img"))
//!     .with_child(SlideElement::new("img"));
//! let mut carousel = Carousel::builder()
//!     .root(root.metrics())
//!     .options(CarouselOptions::default().with_autoplay(false))
//!     .build()
//!     .unwrap();
//! let mut markup = Markup::new(root, &carousel);
//!
//! let next = markup.next_button().unwrap();
//! carousel.dispatch(markup.trigger_at(next).unwrap()).unwrap();
//! markup.sync(&carousel);
//! assert_eq!(markup.element(markup.strip()).style("left"), Some("-300px"));
//! ```

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Write as _;

use kurbo::Size;

use crate::engine::{Carousel, RootMetrics};
use crate::strip::SlideId;
use crate::trigger::Trigger;

/// Handle of an element in a [`Markup`] tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One element: tag, classes, attributes, inline style and content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    style: Vec<(String, String)>,
    html: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Returns the tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the classes in insertion order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns `true` if the element carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value of an inline style property.
    #[must_use]
    pub fn style(&self, name: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the raw inner HTML, if any.
    #[must_use]
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// Returns the child handles in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the parent handle; `None` for the outer wrapper and detached clones.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Adds each non-empty class that is not already present.
    fn add_classes<'a>(&mut self, classes: impl IntoIterator<Item = &'a str>) {
        for class in classes {
            if !class.is_empty() && !self.has_class(class) {
                self.classes.push(class.into());
            }
        }
    }

    fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_classes([class]);
        } else {
            self.classes.retain(|c| c != class);
        }
    }

    fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((name.into(), value)),
        }
    }

    fn set_style(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.style.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.style.push((name.into(), value)),
        }
    }

    fn apply_size(&mut self, size: Size) {
        self.set_style("width", format!("{}px", size.width));
        self.set_style("height", format!("{}px", size.height));
    }
}

/// A child of the root container, before it becomes a slide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideElement {
    /// Tag name.
    pub tag: String,
    /// Classes the host already put on the child.
    pub classes: Vec<String>,
    /// Inner HTML, rendered verbatim.
    pub html: String,
}

impl SlideElement {
    /// Creates an empty child element.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            html: String::new(),
        }
    }

    /// Adds a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets the inner HTML.
    #[must_use]
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }
}

/// The host's root container: its measured size and its children.
#[derive(Clone, Debug, PartialEq)]
pub struct RootElement {
    /// Tag name.
    pub tag: String,
    /// Classes the host already put on the root.
    pub classes: Vec<String>,
    /// Rendered size, measured once before mounting.
    pub size: Size,
    /// Children, in document order.
    pub children: Vec<SlideElement>,
}

impl RootElement {
    /// Creates a root with no children.
    #[must_use]
    pub fn new(tag: impl Into<String>, size: Size) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            size,
            children: Vec::new(),
        }
    }

    /// Adds a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(mut self, child: SlideElement) -> Self {
        self.children.push(child);
        self
    }

    /// Returns what the engine needs to know about this root.
    #[must_use]
    pub fn metrics(&self) -> RootMetrics {
        RootMetrics::new(self.size, self.children.len())
    }
}

/// The element tree of a mounted carousel.
#[derive(Clone, Debug)]
pub struct Markup {
    nodes: Vec<Element>,
    outer: NodeId,
    storage: NodeId,
    slides: Vec<NodeId>,
    clone_pool: Vec<NodeId>,
    prev_button: Option<NodeId>,
    next_button: Option<NodeId>,
    dots: Vec<NodeId>,
    duration_ms: u64,
}

impl Markup {
    /// Builds the tree for `root` using `carousel`'s options and current state.
    #[must_use]
    pub fn new(root: RootElement, carousel: &Carousel) -> Self {
        debug_assert_eq!(
            root.children.len(),
            carousel.slide_count(),
            "root children and carousel slides disagree"
        );
        let options = carousel.options();
        let size = carousel.size();

        let mut markup = Self {
            nodes: Vec::new(),
            outer: NodeId(0),
            storage: NodeId(0),
            slides: Vec::new(),
            clone_pool: Vec::new(),
            prev_button: None,
            next_button: None,
            dots: Vec::new(),
            duration_ms: options.duration_ms,
        };

        let mut outer = Element::new("div");
        outer.add_classes(["carousel-container", options.outer_class.as_str()]);
        outer.set_style("width", format!("{}px", size.width));
        markup.outer = markup.push(outer, None);

        let mut flow = Element::new("div");
        flow.add_classes(["carousel"]);
        flow.apply_size(size);
        let flow = markup.push(flow, Some(markup.outer));

        let mut root_node = Element::new(&root.tag);
        root_node.add_classes(root.classes.iter().map(String::as_str));
        let root_node = markup.push(root_node, Some(flow));

        let mut storage = Element::new("div");
        storage.add_classes(["carousel-items-list"]);
        markup.storage = markup.push(storage, Some(root_node));

        for child in &root.children {
            let mut slide = Element::new(&child.tag);
            slide.add_classes(child.classes.iter().map(String::as_str));
            slide.add_classes(["carousel-item", options.item_class.as_str()]);
            slide.apply_size(size);
            slide.html = Some(child.html.clone());
            let id = markup.push(slide, Some(markup.storage));
            markup.slides.push(id);
        }

        if options.nav.display {
            let mut nav = Element::new("div");
            nav.add_classes(["carousel-nav", options.nav.class.as_str()]);
            let nav = markup.push(nav, Some(markup.outer));

            if options.nav.buttons {
                let mut buttons = Element::new("div");
                buttons.add_classes(["carousel-buttons", options.nav.buttons_class.as_str()]);
                let buttons = markup.push(buttons, Some(nav));

                let mut prev = Element::new("button");
                prev.add_classes(["carousel-prev", options.nav.prev_class.as_str()]);
                prev.html = Some(options.nav.text_prev.clone());
                prev.set_attribute("data-action", Trigger::Prev.action());
                markup.prev_button = Some(markup.push(prev, Some(buttons)));

                let mut next = Element::new("button");
                next.add_classes(["carousel-next", options.nav.next_class.as_str()]);
                next.html = Some(options.nav.text_next.clone());
                next.set_attribute("data-action", Trigger::Next.action());
                markup.next_button = Some(markup.push(next, Some(buttons)));
            }

            if options.dots.display {
                let mut dots = Element::new("div");
                dots.add_classes(["carousel-dots", options.dots.class.as_str()]);
                let dots = markup.push(dots, Some(nav));

                for order in 0..root.children.len() {
                    let mut dot = Element::new("span");
                    dot.add_classes(["carousel-dot-item", options.dots.dot_class.as_str()]);
                    dot.set_attribute("data-action", Trigger::MoveTo(order).action());
                    dot.set_attribute("data-order", order.to_string());
                    let id = markup.push(dot, Some(dots));
                    markup.dots.push(id);
                }
            }
        }

        markup.sync(carousel);
        markup
    }

    /// Re-renders strip order, offset, transition and active markers from `carousel`.
    pub fn sync(&mut self, carousel: &Carousel) {
        let strip = carousel.strip();
        let mut pool = self.clone_pool.clone().into_iter();
        let mut spare = Vec::new();
        let mut children = Vec::with_capacity(strip.slides().len());

        for slide in strip.slides() {
            let Some(&original) = self.slides.get(slide.id.ordinal()) else {
                continue;
            };
            let node = if slide.is_clone {
                let element = self.clone_of(original);
                match pool.next() {
                    Some(node) => {
                        self.nodes[node.0] = element;
                        node
                    }
                    None => {
                        let node = self.push(element, None);
                        spare.push(node);
                        node
                    }
                }
            } else {
                original
            };
            self.nodes[node.0].toggle_class("active", slide.active);
            children.push(node);
        }
        self.clone_pool.extend(spare);

        for &node in &self.clone_pool {
            self.nodes[node.0].parent = None;
        }
        for &node in &children {
            self.nodes[node.0].parent = Some(self.storage);
        }

        let transition = if strip.is_animated() {
            format!("left {}s ease", self.duration_ms as f64 / 1000.0)
        } else {
            "none".into()
        };
        let storage = &mut self.nodes[self.storage.0];
        storage.children = children;
        storage.set_style("left", format!("{}px", strip.offset()));
        storage.set_style("transition", transition);

        if let Some(dots) = carousel.dots() {
            for (index, &node) in self.dots.iter().enumerate() {
                self.nodes[node.0].toggle_class("active", dots.is_active(index));
            }
        }
    }

    /// Returns an element.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this tree.
    #[must_use]
    pub fn element(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    /// Returns the outer wrapper.
    #[must_use]
    pub fn outer(&self) -> NodeId {
        self.outer
    }

    /// Returns the strip container (`.carousel-items-list`).
    #[must_use]
    pub fn strip(&self) -> NodeId {
        self.storage
    }

    /// Returns the element of an original child.
    #[must_use]
    pub fn slide(&self, id: SlideId) -> Option<NodeId> {
        self.slides.get(id.ordinal()).copied()
    }

    /// Returns the "previous" button.
    #[must_use]
    pub fn prev_button(&self) -> Option<NodeId> {
        self.prev_button
    }

    /// Returns the "next" button.
    #[must_use]
    pub fn next_button(&self) -> Option<NodeId> {
        self.next_button
    }

    /// Returns the dot elements in order.
    #[must_use]
    pub fn dots(&self) -> &[NodeId] {
        &self.dots
    }

    /// Returns attached elements carrying `class`, in document order.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = alloc::vec![self.outer];
        while let Some(id) = stack.pop() {
            let element = &self.nodes[id.0];
            if element.has_class(class) {
                found.push(id);
            }
            stack.extend(element.children.iter().rev());
        }
        found
    }

    /// Resolves a click on `target` to a trigger.
    ///
    /// The nearest ancestor (or `target` itself) carrying `data-action` decides:
    /// `next`, `prev`, `moveAt` with its `data-order`, or `dot` with its
    /// position among its siblings.
    #[must_use]
    pub fn trigger_at(&self, target: NodeId) -> Option<Trigger> {
        let node = self.ancestors(target).find(|&id| {
            self.nodes[id.0].attribute("data-action").is_some()
        })?;
        let element = &self.nodes[node.0];
        match element.attribute("data-action")? {
            "dot" => {
                let parent = element.parent?;
                let index = self.nodes[parent.0]
                    .children
                    .iter()
                    .position(|&sibling| sibling == node)?;
                Some(Trigger::MoveTo(index))
            }
            action => Trigger::from_action(action, element.attribute("data-order")),
        }
    }

    /// Returns `true` if `target` is the strip container or inside it.
    #[must_use]
    pub fn in_strip(&self, target: NodeId) -> bool {
        self.ancestors(target).any(|id| id == self.storage)
    }

    /// Serializes the attached tree as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(self.outer, &mut out);
        out
    }

    fn push(&mut self, mut element: Element, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        element.parent = parent;
        self.nodes.push(element);
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    fn clone_of(&self, original: NodeId) -> Element {
        let mut clone = self.nodes[original.0].clone();
        clone.parent = None;
        clone.children.clear();
        clone.add_classes(["clone"]);
        clone
    }

    fn ancestors(&self, start: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(
            (start.0 < self.nodes.len()).then_some(start),
            |id| self.nodes[id.0].parent,
        )
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let element = &self.nodes[id.0];
        out.push('<');
        out.push_str(&element.tag);
        if !element.classes.is_empty() {
            out.push_str(" class=\"");
            escape_into(&element.classes.join(" "), true, out);
            out.push('"');
        }
        for (name, value) in &element.attributes {
            let _ = write!(out, " {name}=\"");
            escape_into(value, true, out);
            out.push('"');
        }
        if !element.style.is_empty() {
            out.push_str(" style=\"");
            for (i, (name, value)) in element.style.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{name}: ");
                escape_into(value, true, out);
                out.push(';');
            }
            out.push('"');
        }
        out.push('>');
        if let Some(html) = &element.html {
            out.push_str(html);
        }
        for &child in &element.children {
            self.write_html(child, out);
        }
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }
}

fn escape_into(value: &str, attribute: bool, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
