//! The document the deck renders into.

/// Element lookup and mutation needed by the deck.
///
/// The deck never inspects layout or styles; it only toggles marker classes,
/// reads `data-*` attributes, writes inline styles and asks for images to be
/// fetched. Implementations decide what an element handle is: a DOM node in
/// the browser, an id in [`MemoryDocument`](crate::effects::MemoryDocument).
pub trait Document {
    /// Handle to a single element.
    type Element: Clone;

    /// Find the element with the given `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// All elements carrying `class`, in document order.
    fn elements_with_class(&self, class: &str) -> Vec<Self::Element>;

    /// Value of the `data-{name}` attribute of `element`.
    fn data_attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    fn add_class(&mut self, element: &Self::Element, class: &str);

    fn remove_class(&mut self, element: &Self::Element, class: &str);

    /// Set an inline style property.
    fn set_style(&mut self, element: &Self::Element, property: &str, value: &str);

    /// Start fetching an image so it is cached before it is displayed.
    /// Completion and failure are not reported.
    fn preload_image(&mut self, url: &str);
}
