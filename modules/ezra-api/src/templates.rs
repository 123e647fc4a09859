use dioxus::prelude::VirtualDom;

/// Render a VirtualDom into a complete HTML document string.
pub fn render_to_html(dom: &VirtualDom) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\" class=\"dark\">{}</html>",
        dioxus::ssr::render(dom)
    )
}

/// Browser tab title for a view.
pub fn page_title(view: &str) -> String {
    format!("{view} | EZRA")
}

/// Query-string value escaping for links built in markup.
pub fn encode_query_value(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}
