//! In-memory document for headless decks and tests.

use crate::core::{ACTIVE, KEYBOARD_HINT, NAV_CONTROL, PAGE_ATTR, PAGE_TEXT};
use crate::effects::document::Document;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, Default, PartialEq)]
struct MemoryElement {
    id: String,
    classes: BTreeSet<String>,
    data: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
}

/// A document made of plain elements addressed by id.
///
/// Elements keep insertion order, which stands in for document order.
///
/// # Example
///
/// ```rust
/// use pageflip::effects::{Document, MemoryDocument};
///
/// let doc = MemoryDocument::deck_markup("page", 3);
/// let page2 = doc.element_by_id("page2").unwrap();
/// assert!(!doc.has_class(&page2, "active"));
/// assert_eq!(doc.elements_with_class("nav-btn").len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    elements: Vec<MemoryElement>,
    preloaded: Vec<String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of a standard deck: `total` pages (the first one active), a
    /// navigation control per page, a keyboard hint and one text element
    /// per page.
    ///
    /// Pages are `{prefix}1..={prefix}{total}`, controls `nav-1..`, text
    /// elements `text-1..`.
    pub fn deck_markup(prefix: &str, total: u32) -> Self {
        let mut doc = Self::new();
        for page in 1..=total {
            let classes: &[&str] = if page == 1 { &["page", ACTIVE] } else { &["page"] };
            doc = doc
                .with_element(&format!("{prefix}{page}"), classes)
                .with_element(&format!("nav-{page}"), &[NAV_CONTROL])
                .with_data(&format!("nav-{page}"), PAGE_ATTR, &page.to_string())
                .with_element(&format!("text-{page}"), &[PAGE_TEXT]);
        }
        doc.with_element("hint", &[KEYBOARD_HINT])
    }

    /// Add an element. An existing element with the same id is replaced.
    pub fn with_element(mut self, id: &str, classes: &[&str]) -> Self {
        self.elements.retain(|e| e.id != id);
        self.elements.push(MemoryElement {
            id: id.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..MemoryElement::default()
        });
        self
    }

    /// Set `data-{name}` on an existing element. Unknown ids are ignored.
    pub fn with_data(mut self, id: &str, name: &str, value: &str) -> Self {
        if let Some(element) = self.find_mut(id) {
            element.data.insert(name.to_string(), value.to_string());
        }
        self
    }

    /// Drop an element from the document.
    pub fn remove_element(&mut self, id: &str) {
        self.elements.retain(|e| e.id != id);
    }

    /// Check a class by element id. Unknown ids have no classes.
    pub fn class_of(&self, id: &str, class: &str) -> bool {
        self.find(id).is_some_and(|e| e.classes.contains(class))
    }

    /// Inline style property by element id.
    pub fn style_of(&self, id: &str, property: &str) -> Option<&str> {
        self.find(id)?.style.get(property).map(String::as_str)
    }

    /// Ids of every element carrying `class`.
    pub fn ids_with_class(&self, class: &str) -> Vec<&str> {
        self.elements
            .iter()
            .filter(|e| e.classes.contains(class))
            .map(|e| e.id.as_str())
            .collect()
    }

    /// URLs handed to [`Document::preload_image`], in call order.
    pub fn preloaded(&self) -> &[String] {
        &self.preloaded
    }

    fn find(&self, id: &str) -> Option<&MemoryElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut MemoryElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }
}

impl Document for MemoryDocument {
    type Element = String;

    fn element_by_id(&self, id: &str) -> Option<String> {
        self.find(id).map(|e| e.id.clone())
    }

    fn elements_with_class(&self, class: &str) -> Vec<String> {
        self.ids_with_class(class)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn data_attribute(&self, element: &String, name: &str) -> Option<String> {
        self.find(element)?.data.get(name).cloned()
    }

    fn has_class(&self, element: &String, class: &str) -> bool {
        self.class_of(element, class)
    }

    fn add_class(&mut self, element: &String, class: &str) {
        if let Some(e) = self.find_mut(element) {
            e.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, element: &String, class: &str) {
        if let Some(e) = self.find_mut(element) {
            e.classes.remove(class);
        }
    }

    fn set_style(&mut self, element: &String, property: &str, value: &str) {
        if let Some(e) = self.find_mut(element) {
            e.style.insert(property.to_string(), value.to_string());
        }
    }

    fn preload_image(&mut self, url: &str) {
        self.preloaded.push(url.to_string());
    }
}
