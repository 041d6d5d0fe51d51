//! Page composition.
//!
//! Section builders take text that is already encoded (or trusted) and
//! arrange it with the markup builder. [`comment_items`] is the one place
//! here that encodes, because it receives raw comments from the store.

use board_core::markup::{
    back_link, heading, link, list_item, page, paragraph, small, strong, unordered_list,
};
use board_core::{Comment, encode};

use crate::Mount;

/// Concatenate sections into a full page.
pub fn layout(title: &str, sections: &[String]) -> String {
    page(title, &sections.concat())
}

pub fn index_sections(mount: &Mount) -> Vec<String> {
    let list = mount.href("/list");
    let comment = mount.href("/comment");
    let search = mount.href("/search");
    let lookup = mount.href("/userByEmail");

    let links = [
        list_item(&link(&list, &format!("GET {list}"))),
        list_item(&link(&comment, &format!("POST {comment}"))),
        list_item(&link(&format!("{search}?q=hello"), &format!("GET {search}?q=..."))),
        list_item(&link(
            &format!("{lookup}?email=test@example.com"),
            &format!("GET {lookup}?email=..."),
        )),
    ];

    vec![
        heading("Comment Board"),
        paragraph(&encode("This board accepts author & text.")),
        paragraph("Use the list endpoint to view recent comments."),
        unordered_list(&links.concat()),
    ]
}

/// `heading_text` and `message` must already be encoded.
pub fn thank_you_sections(heading_text: &str, message: &str, mount: &Mount) -> Vec<String> {
    vec![
        heading(heading_text),
        paragraph("You posted:"),
        paragraph(message),
        paragraph(&link(&mount.href("/list"), "View all comments")),
        back_link(&mount.home()),
    ]
}

/// `query` and `items` must already be encoded.
pub fn search_sections(query: &str, items: &str, mount: &Mount) -> Vec<String> {
    vec![
        heading(&format!("Results for: {query}")),
        paragraph("Matching items:"),
        unordered_list(items),
        back_link(&mount.home()),
    ]
}

pub fn notice_sections(heading_text: &str, message: &str, mount: &Mount) -> Vec<String> {
    vec![
        heading(heading_text),
        paragraph(message),
        back_link(&mount.home()),
    ]
}

/// Five placeholder results embedding the (encoded) query.
pub fn render_items(encoded_query: &str) -> String {
    (1..=5)
        .map(|i| list_item(&format!("Item {i} (query: '{encoded_query}')")))
        .collect()
}

/// One list item per comment; author and text are encoded individually.
pub fn comment_items(comments: &[Comment]) -> String {
    comments
        .iter()
        .map(|c| {
            list_item(&format!(
                "{}: {} {}",
                strong(&encode(c.author())),
                encode(c.text()),
                small(&format!("({})", c.submitted_at_display())),
            ))
        })
        .collect()
}

pub fn comments_sections(comments: &[Comment], mount: &Mount) -> Vec<String> {
    let body = if comments.is_empty() {
        paragraph("No comments yet.")
    } else {
        unordered_list(&comment_items(comments))
    };
    vec![heading("Comments"), body, back_link(&mount.home())]
}

/// `encoded_path` must already be encoded.
pub fn not_found_sections(encoded_path: &str, mount: &Mount) -> Vec<String> {
    vec![
        heading("404 Not Found"),
        paragraph(&format!("No route for: {encoded_path}")),
        back_link(&mount.home()),
    ]
}

/// `encoded_method` must already be encoded.
pub fn method_not_allowed_sections(encoded_method: &str, mount: &Mount) -> Vec<String> {
    vec![
        heading("405 Method Not Allowed"),
        paragraph(&format!("{encoded_method} is not supported here. Use GET or POST.")),
        back_link(&mount.home()),
    ]
}
