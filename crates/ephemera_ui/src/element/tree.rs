//! The per-frame element tree and its construction cursor.
//!
//! # Construction protocol
//!
//! Elements are attached by a two-state cursor instead of explicit parent
//! arguments:
//!
//! | state               | `push_element(k)` creates                     | then      |
//! |---------------------|-----------------------------------------------|-----------|
//! | `OpenParent(p)`     | first child of `p`                            | `OpenSibling(new)` |
//! | `OpenSibling(s)`    | next sibling of `s`, same parent as `s`       | `OpenSibling(new)` |
//!
//! [`ElementTree::start_adding_children`] turns the last created element
//! into the open parent. [`ElementTree::stop_adding_children`] closes the
//! scope: if nothing was added the container itself becomes the open
//! sibling, otherwise the cursor climbs from the last child to its parent.
//!
//! **Contract:** every `start_adding_children` must be matched by exactly
//! one `stop_adding_children` in the same nesting. The pairing is not
//! validated; an unmatched call silently attaches every later element to
//! the wrong container. [`Frame`](crate::Frame) pairs the calls through
//! closures, so only code driving the tree directly has to uphold this.
//!
//! Bounding-box scopes are a second, independent stack that must be paired
//! the same way.

use ephemera_core::{Arena, StrArena, TextSpan};

use super::core::{Element, ElementKind, ElementRef};
use crate::error::{fatal, ContractViolation};
use crate::layout::Rect;
use std::ops::{Index, IndexMut};

/// Where the next element will be attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Next element becomes the first child of this one.
    OpenParent(ElementRef),
    /// Next element becomes the next sibling of this one.
    OpenSibling(ElementRef),
    /// Nothing open; pushing now is a contract violation.
    Closed,
}

/// Arena-backed tree for one frame.
pub struct ElementTree {
    /// Node storage.
    nodes: Arena<Element>,
    /// Text payloads.
    text: StrArena,
    /// Root of the current frame.
    root: Option<ElementRef>,
    /// Cursor: open parent. At most one of the two slots is set.
    open_parent: Option<ElementRef>,
    /// Cursor: open sibling.
    open_sibling: Option<ElementRef>,
    /// Enclosing clip elements, root at the bottom.
    bounding_boxes: Vec<ElementRef>,
    /// Maximum depth of `bounding_boxes`.
    bounding_box_capacity: usize,
}

impl ElementTree {
    /// Creates an empty tree with reserved storage.
    #[must_use]
    pub fn new(element_capacity: usize, text_capacity: usize, bounding_box_capacity: usize) -> Self {
        Self {
            nodes: Arena::new(element_capacity),
            text: StrArena::new(text_capacity),
            root: None,
            open_parent: None,
            open_sibling: None,
            bounding_boxes: Vec::with_capacity(bounding_box_capacity),
            bounding_box_capacity,
        }
    }

    /// Starts a frame: creates the root covering `screen` and opens it.
    pub fn begin_root(&mut self, screen: Rect) -> ElementRef {
        let mut root = Element::new(ElementKind::Root);
        root.layout = screen;
        let root = self.nodes.alloc(root);

        self.root = Some(root);
        self.bounding_boxes.clear();
        self.bounding_boxes.push(root);
        self.open_parent = Some(root);
        self.open_sibling = None;
        root
    }

    /// Returns the root of the current frame.
    #[must_use]
    pub fn root(&self) -> Option<ElementRef> {
        self.root
    }

    /// Returns the cursor state.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        match (self.open_parent, self.open_sibling) {
            (Some(parent), _) => Cursor::OpenParent(parent),
            (None, Some(sibling)) => Cursor::OpenSibling(sibling),
            (None, None) => Cursor::Closed,
        }
    }

    /// Returns the open parent, or else the last created element.
    #[must_use]
    pub fn current(&self) -> Option<ElementRef> {
        self.open_parent.or(self.open_sibling)
    }

    /// Allocates an element and links it at the cursor.
    ///
    /// The new element is the first child of the open parent, or the next
    /// sibling of the open sibling. Afterwards the cursor is
    /// `OpenSibling(new)`.
    ///
    /// # Panics
    ///
    /// Fatal if the cursor is closed.
    pub fn push_element(&mut self, kind: ElementKind) -> ElementRef {
        let mut element = Element::new(kind);
        element.bounding_box = self.bounding_boxes.last().copied();

        let handle = if let Some(parent) = self.open_parent {
            element.parent = Some(parent);
            let handle = self.nodes.alloc(element);
            self.nodes[parent].first_child = Some(handle);
            handle
        } else if let Some(sibling) = self.open_sibling {
            element.prev_sibling = Some(sibling);
            element.parent = self.nodes[sibling].parent;
            let handle = self.nodes.alloc(element);
            self.nodes[sibling].next_sibling = Some(handle);
            handle
        } else {
            fatal(ContractViolation::NoAttachmentPoint);
        };

        self.open_parent = None;
        self.open_sibling = Some(handle);
        handle
    }

    /// Makes the last created element the parent of subsequent elements.
    ///
    /// # Panics
    ///
    /// Fatal if no element is open as a sibling, i.e. the scope has no
    /// container.
    pub fn start_adding_children(&mut self) {
        match self.open_sibling.take() {
            Some(container) => self.open_parent = Some(container),
            None => fatal(ContractViolation::NoScopeOwner),
        }
    }

    /// Closes the current child scope; the container becomes the open sibling.
    pub fn stop_adding_children(&mut self) {
        if let Some(container) = self.open_parent.take() {
            self.open_sibling = Some(container);
        } else if let Some(last_child) = self.open_sibling {
            self.open_sibling = self.nodes[last_child].parent;
        }
    }

    /// Pushes a clip element for hit-testing of everything created inside.
    ///
    /// # Panics
    ///
    /// Fatal when the configured capacity is exceeded.
    pub fn start_bounding_box(&mut self, clip: ElementRef) {
        if self.bounding_boxes.len() >= self.bounding_box_capacity {
            fatal(ContractViolation::BoundingBoxOverflow {
                capacity: self.bounding_box_capacity,
            });
        }
        self.bounding_boxes.push(clip);
    }

    /// Pops the innermost clip element.
    ///
    /// # Panics
    ///
    /// Fatal when only the root's box is left.
    pub fn end_bounding_box(&mut self) {
        if self.bounding_boxes.len() <= 1 {
            fatal(ContractViolation::BoundingBoxUnderflow);
        }
        self.bounding_boxes.pop();
    }

    /// Returns the current bounding-box depth, root included.
    #[must_use]
    pub fn bounding_box_depth(&self) -> usize {
        self.bounding_boxes.len()
    }

    /// Copies text into the frame's string arena.
    pub fn push_text(&mut self, text: &str) -> TextSpan {
        self.text.push(text)
    }

    /// Resolves a text span of this frame.
    #[must_use]
    pub fn text(&self, span: TextSpan) -> &str {
        &self.text[span]
    }

    /// Gets an element, `None` for handles of another frame.
    #[must_use]
    pub fn get(&self, element: ElementRef) -> Option<&Element> {
        self.nodes.get(element)
    }

    /// Iterates over the children of `element` in construction order.
    #[must_use]
    pub fn children(&self, element: ElementRef) -> Children<'_> {
        Children {
            tree: self,
            next: self.nodes[element].first_child,
        }
    }

    /// Counts the children of `element`.
    #[must_use]
    pub fn child_count(&self, element: ElementRef) -> usize {
        self.children(element).count()
    }

    /// Returns the only child of `element`.
    ///
    /// # Panics
    ///
    /// Fatal unless there is exactly one child.
    #[must_use]
    pub fn single_child(&self, element: ElementRef) -> ElementRef {
        let mut children = self.children(element);
        match (children.next(), children.next()) {
            (Some(child), None) => child,
            _ => fatal(ContractViolation::ChildCount {
                kind: self.nodes[element].kind.name(),
                expected: "exactly one",
                found: self.child_count(element),
            }),
        }
    }

    /// Returns all elements in depth-first order.
    pub fn iter_dfs(&self) -> impl Iterator<Item = ElementRef> + '_ {
        DfsIterator {
            tree: self,
            stack: self.root.into_iter().collect(),
        }
    }

    /// Number of elements in this frame, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.used()
    }

    /// Returns true before the root of a frame is created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Largest element count of any frame so far.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.nodes.high_water()
    }

    /// Drops the whole generation; storage is kept for the next frame.
    pub fn reset(&mut self) {
        self.nodes.reset();
        self.text.reset();
        self.root = None;
        self.open_parent = None;
        self.open_sibling = None;
        self.bounding_boxes.clear();
    }
}

impl Index<ElementRef> for ElementTree {
    type Output = Element;

    fn index(&self, element: ElementRef) -> &Element {
        match self.nodes.get(element) {
            Some(node) => node,
            None => fatal(ContractViolation::StaleElement),
        }
    }
}

impl IndexMut<ElementRef> for ElementTree {
    fn index_mut(&mut self, element: ElementRef) -> &mut Element {
        match self.nodes.get_mut(element) {
            Some(node) => node,
            None => fatal(ContractViolation::StaleElement),
        }
    }
}

/// Iterator over the children of one element.
pub struct Children<'a> {
    tree: &'a ElementTree,
    next: Option<ElementRef>,
}

impl Iterator for Children<'_> {
    type Item = ElementRef;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree[current].next_sibling;
        Some(current)
    }
}

/// Depth-first iterator over the element tree.
struct DfsIterator<'a> {
    tree: &'a ElementTree,
    stack: Vec<ElementRef>,
}

impl Iterator for DfsIterator<'_> {
    type Item = ElementRef;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.tree[id];

        // Sibling below first child, so a subtree finishes before the next sibling.
        // The root has no siblings, so only its subtree is walked.
        self.stack.extend(node.next_sibling);
        self.stack.extend(node.first_child);

        Some(id)
    }
}
