//! Owned, namespace-aware XML element tree.
//!
//! `ManifestNode` is the in-memory shape of a POM document: every element
//! carries a qualified name, optional text, ordered attributes and ordered
//! children. Comments and processing instructions are not modelled.

use std::fmt;

/// Namespace URI of the `xsi:` attributes (schema location hints).
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Namespace URI bound to the reserved `xml:` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A namespace-qualified element or attribute name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI, `None` for unqualified names.
    pub namespace: Option<String>,
    /// Local part of the name.
    pub local: String,
}

impl QName {
    /// Create a name inside a namespace. An empty URI means no namespace.
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        let namespace = namespace.into();
        QName {
            namespace: (!namespace.is_empty()).then_some(namespace),
            local: local.into(),
        }
    }

    /// Create a name without a namespace.
    pub fn unqualified(local: impl Into<String>) -> Self {
        QName {
            namespace: None,
            local: local.into(),
        }
    }

    /// Check the name against a namespace URI and local name.
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local == local
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

/// An attribute on a [`ManifestNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

/// One element of the descriptor tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestNode {
    name: QName,
    text: Option<String>,
    attributes: Vec<Attribute>,
    children: Vec<ManifestNode>,
}

impl ManifestNode {
    /// Create an empty element.
    pub fn new(name: QName) -> Self {
        ManifestNode {
            name,
            text: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element holding only text.
    pub fn leaf(name: QName, text: impl Into<String>) -> Self {
        ManifestNode {
            text: Some(text.into()),
            ..ManifestNode::new(name)
        }
    }

    /// Builder form of [`ManifestNode::push`].
    pub fn with_child(mut self, child: ManifestNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder form of [`ManifestNode::set_attribute`].
    pub fn with_attribute(mut self, name: QName, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn name(&self) -> &QName {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Look up an attribute value by qualified name.
    pub fn attribute(&self, name: &QName) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| &a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing an existing one with the same name in place.
    pub fn set_attribute(&mut self, name: QName, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    pub fn children(&self) -> &[ManifestNode] {
        &self.children
    }

    /// Append a child at the end.
    pub fn push(&mut self, child: ManifestNode) {
        self.children.push(child);
    }

    /// Insert a child at `index`, clamped to the number of children.
    pub fn insert(&mut self, index: usize, child: ManifestNode) {
        let index = index.min(self.children.len());
        self.children.insert(index, child);
    }

    /// Remove and return every child, leaving this node empty.
    pub fn take_children(&mut self) -> Vec<ManifestNode> {
        std::mem::take(&mut self.children)
    }

    /// Position of the first child with the given name.
    pub fn position(&self, name: &QName) -> Option<usize> {
        self.children.iter().position(|c| &c.name == name)
    }

    /// First child with the given name.
    pub fn child(&self, name: &QName) -> Option<&ManifestNode> {
        self.children.iter().find(|c| &c.name == name)
    }

    /// First child with the given name, mutably.
    pub fn child_mut(&mut self, name: &QName) -> Option<&mut ManifestNode> {
        self.children.iter_mut().find(|c| &c.name == name)
    }

    /// Every child with the given name, in document order.
    pub fn children_named<'a>(
        &'a self,
        name: &'a QName,
    ) -> impl Iterator<Item = &'a ManifestNode> + 'a {
        self.children.iter().filter(move |c| &c.name == name)
    }

    /// Remove the first child with the given name and return it.
    pub fn remove_child(&mut self, name: &QName) -> Option<ManifestNode> {
        let idx = self.position(name)?;
        Some(self.children.remove(idx))
    }

    /// Follow a path of child names from this node.
    pub fn descend(&self, path: &[QName]) -> Option<&ManifestNode> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }

    /// Parse a document and return its root element.
    pub fn parse(text: &str) -> Result<ManifestNode, roxmltree::Error> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(text, options)?;
        Ok(Self::from_xml(doc.root_element()))
    }

    fn from_xml(node: roxmltree::Node<'_, '_>) -> ManifestNode {
        let tag = node.tag_name();
        let name = QName {
            namespace: tag.namespace().filter(|ns| !ns.is_empty()).map(str::to_string),
            local: tag.name().to_string(),
        };

        let attributes = node
            .attributes()
            .map(|a| Attribute {
                name: QName {
                    namespace: a
                        .namespace()
                        .filter(|ns| !ns.is_empty())
                        .map(str::to_string),
                    local: a.name().to_string(),
                },
                value: a.value().to_string(),
            })
            .collect();

        // Whitespace-only text is indentation, not content.
        let raw: String = node
            .children()
            .filter(|c| c.is_text())
            .filter_map(|c| c.text())
            .collect();
        let text = (!raw.trim().is_empty()).then_some(raw);

        let children = node
            .children()
            .filter(|c| c.is_element())
            .map(Self::from_xml)
            .collect();

        ManifestNode {
            name,
            text,
            attributes,
            children,
        }
    }
}
