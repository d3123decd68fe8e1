use indexmap::IndexMap;

/// A schema-agnostic XML element.
///
/// Children are grouped into slots by tag name. Slot order is the order in
/// which the tags were first encountered; order of repeated children within
/// one slot follows document order and is always preserved. Order *between*
/// slots is authoritative only after a reorder pass (`convert::ordering`) —
/// source slot order must not leak into the output of the four reordered
/// containers.
///
/// Text content and child elements are mutually exclusive except for the
/// legacy amount shape (`<Amt>9.00<Ccy>CHF</Ccy></Amt>`), which the reader
/// preserves as text alongside the `Ccy` child.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: IndexMap<String, Vec<Element>>,
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Create a text-only element.
    pub fn with_text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(tag);
        element.text = Some(text.into());
        element
    }

    /// A copy carrying the tag, attributes, and text, but none of the children.
    pub fn shallow_clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            attributes: self.attributes.clone(),
            text: self.text.clone(),
            children: IndexMap::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Relabel this element, keeping everything else.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing the value in place when the name exists.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value.into(),
            None => self.attributes.push((name, value.into())),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attributes.iter().position(|(k, _)| k == name)?;
        Some(self.attributes.remove(idx).1)
    }

    /// Attributes in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Append a text fragment, separated from existing text by a space.
    ///
    /// Mixed-content nodes can split their text around a child element; the
    /// reader joins the fragments here.
    pub fn append_text(&mut self, fragment: &str) {
        match &mut self.text {
            Some(text) => {
                text.push(' ');
                text.push_str(fragment);
            }
            None => self.text = Some(fragment.to_string()),
        }
    }

    /// Append a child to its tag's slot, creating the slot at the end when
    /// the tag has not been seen yet.
    pub fn push_child(&mut self, child: Element) {
        let tag = child.tag.clone();
        self.children.entry(tag).or_default().push(child);
    }

    pub fn has_child(&self, tag: &str) -> bool {
        self.children.contains_key(tag)
    }

    /// First child with the given tag.
    pub fn first_child(&self, tag: &str) -> Option<&Element> {
        self.children.get(tag).and_then(|slot| slot.first())
    }

    pub fn first_child_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.children.get_mut(tag).and_then(|slot| slot.first_mut())
    }

    /// All children with the given tag, in document order.
    pub fn children_of(&self, tag: &str) -> &[Element] {
        self.children.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Detach and return the whole slot for a tag. The remaining slots keep
    /// their relative order.
    pub fn take_children(&mut self, tag: &str) -> Vec<Element> {
        self.children.shift_remove(tag).unwrap_or_default()
    }

    /// Detach every slot, in slot order.
    pub fn drain_children(&mut self) -> impl Iterator<Item = (String, Vec<Element>)> + '_ {
        self.children.drain(..)
    }

    /// Child tags in slot order.
    pub fn child_tags(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// All children flattened in slot order.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.values().flat_map(|slot| slot.iter())
    }

    pub fn children_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.values_mut().flat_map(|slot| slot.iter_mut())
    }

    /// First element reached by following a path of child tags.
    pub fn descendant(&self, path: &[&str]) -> Option<&Element> {
        let mut node = self;
        for tag in path {
            node = node.first_child(tag)?;
        }
        Some(node)
    }

    /// True when the element has no children and no (non-empty) text.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.as_deref().is_none_or(str::is_empty)
    }
}
