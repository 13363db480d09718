use ego_tree::NodeRef;
use scraper::{Html, Node, Selector};

/// Returns the serialized `<body>` element, or an empty string when the
/// input is empty or has no body.
pub fn extract_body(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let document = Html::parse_document(html);
    let body = Selector::parse("body").expect("static selector");

    document
        .select(&body)
        .next()
        .map(|element| element.html())
        .unwrap_or_default()
}

/// Strips script and style subtrees, flattens the rest to text with one
/// line per text node, trims every line, and drops blank lines.
pub fn clean_body(body_html: &str) -> String {
    if body_html.trim().is_empty() {
        return String::new();
    }

    let document = Html::parse_document(body_html);
    let mut pieces = Vec::new();
    collect_text(document.tree.root(), &mut pieces);

    pieces
        .join("\n")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(node: NodeRef<'_, Node>, pieces: &mut Vec<String>) {
    if let Some(element) = node.value().as_element() {
        if matches!(element.name(), "script" | "style") {
            return;
        }
    }

    if let Some(text) = node.value().as_text() {
        pieces.push(text.to_string());
    }

    for child in node.children() {
        collect_text(child, pieces);
    }
}
