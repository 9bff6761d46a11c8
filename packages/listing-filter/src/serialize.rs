//! Indented HTML serialization.
//!
//! Renders a parsed document back to markup with one node per line, the way
//! a human wants to read a filtered page. Whitespace between elements is
//! normalized; text inside `<script>` and `<style>` is emitted verbatim
//! since those bodies are whitespace- and escape-sensitive.

use ego_tree::NodeRef;
use scraper::{Html, Node};

const INDENT: &str = "  ";

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are written without escaping.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Render the whole document as indented markup.
pub fn to_pretty_html(document: &Html) -> String {
    let mut out = String::new();
    for child in document.tree.root().children() {
        write_node(&mut out, child, 0, false);
    }
    out
}

fn write_node(out: &mut String, node: NodeRef<'_, Node>, depth: usize, raw_text: bool) {
    match node.value() {
        Node::Document | Node::Fragment => {
            for child in node.children() {
                write_node(out, child, depth, raw_text);
            }
        }
        Node::Doctype(doctype) => {
            push_indent(out, depth);
            out.push_str("<!DOCTYPE ");
            out.push_str(&doctype.name);
            out.push_str(">\n");
        }
        Node::Comment(comment) => {
            push_indent(out, depth);
            out.push_str("<!--");
            out.push_str(&comment.comment);
            out.push_str("-->\n");
        }
        Node::Text(text) => {
            if raw_text {
                if !text.text.trim().is_empty() {
                    out.push_str(&text.text);
                    out.push('\n');
                }
                return;
            }
            let trimmed = text.text.trim();
            if !trimmed.is_empty() {
                push_indent(out, depth);
                escape_text(trimmed, out);
                out.push('\n');
            }
        }
        Node::ProcessingInstruction(pi) => {
            push_indent(out, depth);
            out.push_str("<?");
            out.push_str(&pi.target);
            out.push(' ');
            out.push_str(&pi.data);
            out.push_str("?>\n");
        }
        Node::Element(element) => {
            let name = element.name();

            push_indent(out, depth);
            out.push('<');
            out.push_str(name);
            for (attr, value) in element.attrs() {
                out.push(' ');
                out.push_str(attr);
                out.push_str("=\"");
                escape_attr(value, out);
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&name) {
                out.push('\n');
                return;
            }

            if !node.has_children() {
                out.push_str("</");
                out.push_str(name);
                out.push_str(">\n");
                return;
            }

            out.push('\n');
            let raw = RAW_TEXT_ELEMENTS.contains(&name);
            for child in node.children() {
                write_node(out, child, depth + 1, raw);
            }
            push_indent(out, depth);
            out.push_str("</");
            out.push_str(name);
            out.push_str(">\n");
        }
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
