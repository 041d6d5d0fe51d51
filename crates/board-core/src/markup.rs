//! Small HTML fragment builders.
//!
//! These wrap their argument in a tag and nothing more. Callers must run
//! untrusted text through [`encode`] before handing it over. The two
//! exceptions are the `page` title and the `link` label, which are always
//! encoded here because the builder controls where they land.

use crate::encode::encode;

/// Wrap `content` in `<name>…</name>`.
pub fn tag(name: &str, content: &str) -> String {
    format!("<{name}>{content}</{name}>")
}

pub fn heading(text: &str) -> String {
    tag("h1", text)
}

pub fn paragraph(text: &str) -> String {
    tag("p", text)
}

/// `items` is the concatenated markup of zero or more [`list_item`]s.
pub fn unordered_list(items: &str) -> String {
    tag("ul", items)
}

pub fn list_item(text: &str) -> String {
    tag("li", text)
}

pub fn strong(text: &str) -> String {
    tag("strong", text)
}

pub fn small(text: &str) -> String {
    tag("small", text)
}

/// Anchor element. The label is encoded; `href` is emitted as given and
/// must come from trusted code.
pub fn link(href: &str, label: &str) -> String {
    format!(r#"<a href="{href}">{}</a>"#, encode(label))
}

/// Paragraph with a link back to the board's index.
pub fn back_link(home_href: &str) -> String {
    paragraph(&link(home_href, "← back"))
}

/// Full HTML document. The title is encoded, the body is not.
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html><html><head><meta charset="utf-8"><title>{}</title></head><body>{body}</body></html>"#,
        encode(title),
    )
}
