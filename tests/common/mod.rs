//! Notion API payload builders shared by the integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};

pub const PARENT_ID: &str = "414cd412-8533-8087-a989-cf37889137c5";

/// Id number `n` as the hyphenated form the API reports.
pub fn hyphenated_id(n: u32) -> String {
    let hex = format!("{:032x}", n);
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

pub fn rich_text(text: &str) -> Value {
    json!({
        "type": "text",
        "text": {"content": text, "link": null},
        "annotations": {
            "bold": false,
            "italic": false,
            "strikethrough": false,
            "underline": false,
            "code": false,
            "color": "default"
        },
        "plain_text": text,
        "href": null
    })
}

pub fn block(n: u32, kind: &str, has_children: bool, payload: Value) -> Value {
    let mut block = json!({
        "object": "block",
        "id": hyphenated_id(n),
        "parent": {"type": "page_id", "page_id": PARENT_ID},
        "created_time": "2025-06-20T00:00:00.000Z",
        "last_edited_time": "2025-06-20T00:00:00.000Z",
        "created_by": {"object": "user", "id": "user-id"},
        "last_edited_by": {"object": "user", "id": "user-id"},
        "has_children": has_children,
        "archived": false,
        "type": kind
    });
    block[kind] = payload;
    block
}

pub fn paragraph(n: u32, text: &str) -> Value {
    block(
        n,
        "paragraph",
        false,
        json!({"rich_text": [rich_text(text)], "color": "default"}),
    )
}

pub fn heading(n: u32, level: u8, text: &str) -> Value {
    block(
        n,
        &format!("heading_{}", level),
        false,
        json!({"rich_text": [rich_text(text)], "color": "default", "is_toggleable": false}),
    )
}

pub fn bullet(n: u32, runs: &[&str], has_children: bool) -> Value {
    let runs: Vec<Value> = runs.iter().map(|r| rich_text(r)).collect();
    block(
        n,
        "bulleted_list_item",
        has_children,
        json!({"rich_text": runs, "color": "default"}),
    )
}

pub fn toggle(n: u32, text: &str) -> Value {
    block(
        n,
        "toggle",
        true,
        json!({"rich_text": [rich_text(text)], "color": "default"}),
    )
}

pub fn child_page(n: u32, title: &str) -> Value {
    block(n, "child_page", true, json!({"title": title}))
}

pub fn external_image(n: u32, url: &str) -> Value {
    block(
        n,
        "image",
        false,
        json!({"caption": [], "type": "external", "external": {"url": url}}),
    )
}

pub fn hosted_file(n: u32, url: &str, caption: &str) -> Value {
    let caption: Vec<Value> = if caption.is_empty() {
        vec![]
    } else {
        vec![rich_text(caption)]
    };
    block(
        n,
        "file",
        false,
        json!({
            "caption": caption,
            "type": "file",
            "file": {"url": url, "expiry_time": "2025-06-20T01:00:00.000Z"},
            "name": "upload.pdf"
        }),
    )
}

pub fn children_page(results: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "object": "list",
        "results": results,
        "next_cursor": next_cursor,
        "has_more": next_cursor.is_some(),
        "type": "block",
        "block": {}
    })
}
