//! Pretty rendering of a [`ManifestNode`] tree to XML text.
//!
//! Output is one element per line with two-space indentation, leaf text
//! kept inline. Namespace declarations are hoisted onto the root element:
//! the preferred namespace becomes the default one, XSI gets `xsi`, and any
//! other namespace gets a generated `nsN` prefix.

use std::fmt::Write as _;

use super::node::{ManifestNode, QName, XML_NAMESPACE, XSI_NAMESPACE};

const INDENT: &str = "  ";

/// Rendering configuration.
#[derive(Debug, Clone)]
pub struct RenderOptions<'a> {
    /// Namespace written as the default (`xmlns="..."`) namespace.
    pub default_namespace: Option<&'a str>,
    /// Emit the `<?xml ... ?>` declaration line.
    pub declaration: bool,
}

impl Default for RenderOptions<'_> {
    fn default() -> Self {
        RenderOptions {
            default_namespace: None,
            declaration: true,
        }
    }
}

/// Prefix table built from a pre-pass over the tree.
struct Prefixes<'a> {
    default: Option<&'a str>,
    bound: Vec<(String, String)>,
}

impl<'a> Prefixes<'a> {
    fn collect(root: &ManifestNode, default: Option<&'a str>) -> Self {
        let mut prefixes = Prefixes {
            default,
            bound: Vec::new(),
        };
        prefixes.visit(root);
        prefixes
    }

    fn visit(&mut self, node: &ManifestNode) {
        if let Some(ns) = node.name().namespace.as_deref() {
            if Some(ns) != self.default {
                self.bind(ns);
            }
        }
        for attr in node.attributes() {
            if let Some(ns) = attr.name.namespace.as_deref() {
                // Attributes never pick up the default namespace, so they always need a prefix.
                self.bind(ns);
            }
        }
        for child in node.children() {
            self.visit(child);
        }
    }

    fn bind(&mut self, ns: &str) {
        if ns.is_empty() || ns == XML_NAMESPACE || self.bound.iter().any(|(uri, _)| uri == ns) {
            return;
        }
        let prefix = if ns == XSI_NAMESPACE {
            "xsi".to_string()
        } else {
            let generated = self
                .bound
                .iter()
                .filter(|(_, p)| p.starts_with("ns"))
                .count();
            format!("ns{}", generated)
        };
        self.bound.push((ns.to_string(), prefix));
    }

    fn prefix_of(&self, ns: &str) -> Option<&str> {
        if ns == XML_NAMESPACE {
            return Some("xml");
        }
        self.bound
            .iter()
            .find(|(uri, _)| uri == ns)
            .map(|(_, p)| p.as_str())
    }

    fn element_name(&self, name: &QName) -> String {
        match name.namespace.as_deref() {
            Some(ns) if Some(ns) == self.default => name.local.clone(),
            Some(ns) => match self.prefix_of(ns) {
                Some(prefix) => format!("{}:{}", prefix, name.local),
                None => name.local.clone(),
            },
            None => name.local.clone(),
        }
    }

    fn attribute_name(&self, name: &QName) -> String {
        match name.namespace.as_deref().and_then(|ns| self.prefix_of(ns)) {
            Some(prefix) => format!("{}:{}", prefix, name.local),
            None => name.local.clone(),
        }
    }
}

/// Render a tree to text.
///
/// Lines that are empty or whitespace-only are dropped from the result, so
/// multi-line text values never leave blank lines behind.
pub fn render(root: &ManifestNode, opts: &RenderOptions<'_>) -> String {
    let prefixes = Prefixes::collect(root, opts.default_namespace);

    let mut out = String::new();
    if opts.declaration {
        out.push_str("<?xml version=\"1.0\" ?>\n");
    }

    let root_decls = prefixes
        .bound
        .iter()
        .map(|(uri, prefix)| format!("xmlns:{}=\"{}\"", prefix, escape_attr(uri)))
        .collect();

    write_node(&mut out, root, 0, &prefixes, None, root_decls);

    let mut compact = out
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    compact.push('\n');
    compact
}

fn write_node(
    out: &mut String,
    node: &ManifestNode,
    depth: usize,
    prefixes: &Prefixes<'_>,
    in_scope_default: Option<&str>,
    mut decls: Vec<String>,
) {
    let indent = INDENT.repeat(depth);
    let name = prefixes.element_name(node.name());

    // Re-bind the default namespace where this element's name depends on it.
    let element_ns = node.name().namespace.as_deref();
    let mut child_default = in_scope_default;
    match element_ns {
        None if in_scope_default.is_some() => {
            decls.insert(0, "xmlns=\"\"".to_string());
            child_default = None;
        }
        Some(ns) if Some(ns) == prefixes.default && in_scope_default != Some(ns) => {
            decls.insert(0, format!("xmlns=\"{}\"", escape_attr(ns)));
            child_default = Some(ns);
        }
        _ => {}
    }

    let _ = write!(out, "{}<{}", indent, name);
    for decl in &decls {
        let _ = write!(out, " {}", decl);
    }
    for attr in node.attributes() {
        let _ = write!(
            out,
            " {}=\"{}\"",
            prefixes.attribute_name(&attr.name),
            escape_attr(&attr.value)
        );
    }

    match (node.text(), node.children().is_empty()) {
        (None, true) => {
            out.push_str("/>\n");
        }
        (Some(text), true) => {
            let _ = writeln!(out, ">{}</{}>", escape_text(text), name);
        }
        (text, false) => {
            out.push_str(">\n");
            if let Some(text) = text {
                let _ = writeln!(out, "{}{}{}", indent, INDENT, escape_text(text));
            }
            for child in node.children() {
                write_node(out, child, depth + 1, prefixes, child_default, Vec::new());
            }
            let _ = writeln!(out, "{}</{}>", indent, name);
        }
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#10;"),
            '\t' => escaped.push_str("&#9;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
