#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn boxed(x: f64, y: f64, text: &str) -> TextBox {
    let mut tb = TextLayer::open_draft(pt(x, y));
    tb.text = text.into();
    tb
}

// =============================================================
// Drafts
// =============================================================

#[test]
fn open_draft_uses_default_style() {
    let draft = TextLayer::open_draft(pt(5.0, 6.0));
    assert_eq!(draft, TextBox::new(pt(5.0, 6.0)));
}

#[test]
fn draft_edits_apply() {
    let mut draft = TextLayer::open_draft(pt(0.0, 0.0));
    DraftEdit::Text("Hello".into()).apply(&mut draft);
    DraftEdit::Font("Georgia".into()).apply(&mut draft);
    DraftEdit::Size(32.0).apply(&mut draft);
    DraftEdit::Color("#ff0000".into()).apply(&mut draft);
    DraftEdit::ToggleBold.apply(&mut draft);
    DraftEdit::ToggleItalic.apply(&mut draft);
    DraftEdit::ToggleUnderline.apply(&mut draft);
    assert_eq!(draft.text, "Hello");
    assert_eq!(draft.font, "Georgia");
    assert_eq!(draft.size, 32.0);
    assert_eq!(draft.color, "#ff0000");
    assert!(draft.bold && draft.italic && draft.underline);
}

#[test]
fn toggles_flip_back() {
    let mut draft = TextLayer::open_draft(pt(0.0, 0.0));
    DraftEdit::ToggleBold.apply(&mut draft);
    DraftEdit::ToggleBold.apply(&mut draft);
    assert!(!draft.bold);
}

#[test]
fn toolbar_choices_apply_to_draft() {
    use crate::consts::{FONT_CHOICES, TEXT_SIZE_CHOICES};

    let mut draft = TextLayer::open_draft(pt(0.0, 0.0));
    assert!(FONT_CHOICES.contains(&draft.font.as_str()));
    for (font, size) in FONT_CHOICES.iter().zip(TEXT_SIZE_CHOICES) {
        DraftEdit::Font((*font).to_owned()).apply(&mut draft);
        DraftEdit::Size(size).apply(&mut draft);
        assert_eq!((draft.font.as_str(), draft.size), (*font, size));
    }
}

#[test]
fn invalid_size_is_ignored() {
    let mut draft = TextLayer::open_draft(pt(0.0, 0.0));
    DraftEdit::Size(0.0).apply(&mut draft);
    DraftEdit::Size(-3.0).apply(&mut draft);
    DraftEdit::Size(f64::INFINITY).apply(&mut draft);
    assert_eq!(draft.size, 20.0);
}

// =============================================================
// Commit / drag / reset
// =============================================================

#[test]
fn commit_appends_in_order() {
    let mut layer = TextLayer::new();
    assert_eq!(layer.commit(boxed(0.0, 0.0, "a")), 0);
    assert_eq!(layer.commit(boxed(10.0, 0.0, "b")), 1);
    assert_eq!(layer.len(), 2);
    assert_eq!(layer.boxes()[1].text, "b");
}

#[test]
fn empty_draft_is_still_committed() {
    let mut layer = TextLayer::new();
    layer.commit(TextLayer::open_draft(pt(1.0, 1.0)));
    assert_eq!(layer.len(), 1);
    assert!(layer.boxes()[0].text.is_empty());
}

#[test]
fn drag_moves_by_delta() {
    let mut layer = TextLayer::new();
    layer.commit(boxed(20.0, 30.0, "x"));
    assert!(layer.drag(0, 5.0, -10.0));
    let tb = layer.get(0).unwrap();
    assert_eq!((tb.x, tb.y), (25.0, 20.0));
}

#[test]
fn drag_unknown_index_is_rejected() {
    let mut layer = TextLayer::new();
    assert!(!layer.drag(3, 1.0, 1.0));
    assert!(!layer.move_to(0, pt(1.0, 1.0)));
}

#[test]
fn reset_clears_all() {
    let mut layer = TextLayer::new();
    layer.commit(boxed(0.0, 0.0, "a"));
    layer.reset();
    assert!(layer.is_empty());
}

// =============================================================
// Hit testing
// =============================================================

#[test]
fn bounds_have_minimum_width() {
    let r = text_bounds(&boxed(0.0, 0.0, ""));
    assert_eq!(r.width, TEXT_BOX_MIN_WIDTH);
    assert_eq!(r.height, 20.0 * LINE_HEIGHT_RATIO + TEXT_BOX_PADDING_Y);
}

#[test]
fn bounds_grow_with_text() {
    let short = text_bounds(&boxed(0.0, 0.0, "hi"));
    let long = text_bounds(&boxed(0.0, 0.0, "a much longer annotation"));
    assert!(long.width > short.width);
}

#[test]
fn hit_finds_box_under_point() {
    let mut layer = TextLayer::new();
    layer.commit(boxed(100.0, 100.0, "x"));
    assert_eq!(layer.hit(pt(110.0, 110.0)), Some(0));
    assert_eq!(layer.hit(pt(90.0, 110.0)), None);
}

#[test]
fn hit_prefers_topmost_box() {
    let mut layer = TextLayer::new();
    layer.commit(boxed(100.0, 100.0, "under"));
    layer.commit(boxed(110.0, 105.0, "over"));
    assert_eq!(layer.hit(pt(120.0, 110.0)), Some(1));
}
