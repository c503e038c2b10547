#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_pen() {
    assert_eq!(Tool::default(), Tool::Pen);
}

#[test]
fn tool_serde_lowercase() {
    let cases = [
        (Tool::Pen, "\"pen\""),
        (Tool::Eraser, "\"eraser\""),
        (Tool::Line, "\"line\""),
        (Tool::Text, "\"text\""),
        (Tool::Compass, "\"compass\""),
    ];
    for (tool, expected) in cases {
        assert_eq!(serde_json::to_string(&tool).unwrap(), expected);
        let back: Tool = serde_json::from_str(expected).unwrap();
        assert_eq!(back, tool);
    }
}

#[test]
fn neutral_tool_serializes_null() {
    let none: Option<Tool> = None;
    assert_eq!(serde_json::to_string(&none).unwrap(), "null");
}

#[test]
fn raster_tools() {
    assert!(Tool::Pen.paints_raster());
    assert!(Tool::Eraser.paints_raster());
    assert!(Tool::Line.paints_raster());
    assert!(!Tool::Text.paints_raster());
    assert!(!Tool::Compass.paints_raster());
}

// =============================================================
// Button
// =============================================================

#[test]
fn button_from_dom() {
    assert_eq!(Button::from_dom(0), Button::Primary);
    assert_eq!(Button::from_dom(1), Button::Middle);
    assert_eq!(Button::from_dom(2), Button::Secondary);
    assert_eq!(Button::from_dom(7), Button::Primary);
}

// =============================================================
// UiState
// =============================================================

#[test]
fn ui_defaults() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Some(Tool::Pen));
    assert_eq!(ui.color, "#000000");
    assert_eq!(ui.line_width, 2.0);
    assert!(!ui.ruler.visible);
    assert_eq!(ui.compass.position, Point::new(100.0, 100.0));
    assert_eq!(ui.compass.angle, 0.0);
}

#[test]
fn line_width_is_clamped() {
    let mut ui = UiState::default();
    ui.set_line_width(100.0);
    assert_eq!(ui.line_width, 30.0);
    ui.set_line_width(0.0);
    assert_eq!(ui.line_width, 1.0);
    ui.set_line_width(f64::NAN);
    assert_eq!(ui.line_width, 1.0);
}

#[test]
fn compass_bounds_are_square_at_position() {
    let guide = CompassGuide::default();
    let b = guide.bounds();
    assert_eq!((b.x, b.y, b.width, b.height), (100.0, 100.0, 100.0, 100.0));
}

// =============================================================
// InteractionMode
// =============================================================

#[test]
fn idle_is_default_and_uncaptured() {
    let mode = InteractionMode::default();
    assert_eq!(mode, InteractionMode::Idle);
    assert!(!mode.captures_pointer());
}

#[test]
fn gestures_capture_pointer() {
    let p = Point::new(1.0, 1.0);
    assert!(InteractionMode::Stroking { last: p }.captures_pointer());
    assert!(InteractionMode::Erasing.captures_pointer());
    assert!(InteractionMode::ConstructingCircle { pivot: p, current: p }.captures_pointer());
    assert!(!InteractionMode::PivotSet { pivot: p }.captures_pointer());
    assert!(!InteractionMode::EditingText(TextBox::new(p)).captures_pointer());
}

#[test]
fn draft_only_while_editing() {
    let p = Point::new(3.0, 4.0);
    assert!(InteractionMode::Idle.draft().is_none());
    let mode = InteractionMode::EditingText(TextBox::new(p));
    assert_eq!(mode.draft().map(TextBox::anchor), Some(p));
}

#[test]
fn compass_session_views() {
    let pivot = Point::new(1.0, 2.0);
    let cur = Point::new(5.0, 2.0);
    assert_eq!(InteractionMode::PivotSet { pivot }.compass_session(), Some((pivot, None)));
    assert_eq!(
        InteractionMode::ConstructingCircle { pivot, current: cur }.compass_session(),
        Some((pivot, Some(cur)))
    );
    assert_eq!(InteractionMode::Erasing.compass_session(), None);
}
