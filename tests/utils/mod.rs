//! 結合テスト共通のヘルパー

#![allow(dead_code)]

use orinium_backdrop::engine::bridge::Rect;
use orinium_backdrop::engine::document::{ElementId, StaticDocument};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub const VIEWPORT: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

/// `<html>` and a full-size `<body>`, neither with a background.
pub fn blank_page() -> (StaticDocument, ElementId) {
    let mut doc = StaticDocument::new(VIEWPORT);
    let body = doc
        .append(doc.root(), "body", VIEWPORT, "")
        .expect("body declarations are valid");
    (doc, body)
}

pub fn boxed(left: f32, top: f32, width: f32, height: f32) -> Rect {
    Rect::new(left, top, width, height)
}
