use std::time::{Duration, Instant};

use floatlabel::prelude::*;

fn field_rect() -> Rect {
    Rect::new(20.0, 60.0, 280.0, 40.0)
}

fn app() -> App {
    App::with_config(AppConfig {
        animations: AnimationSettings::disabled(),
        ..Default::default()
    })
}

fn label_command(frame: &Frame, placeholder: &str) -> Option<DrawCommand> {
    // The inner input draws the inline placeholder first; the label comes last
    frame
        .commands
        .iter()
        .rev()
        .find(|c| c.text() == Some(placeholder))
        .cloned()
}

#[test]
fn test_initial_state() {
    let _app = app();
    let mut field = FloatingPlaceholderField::new(field_rect());
    field.set_placeholder("Email");

    assert_eq!(field.state(), PlaceholderState::Empty);
    assert_eq!(field.label().alpha(), 0.0);
    assert_eq!(field.label().font_size(), 17.0);
    assert_eq!(field.label_vertical_offset(), 0.0);
    assert_eq!(field.label_horizontal_offset(), 0.0);
    assert!(field.is_underline_enabled());
    assert!(field.is_material_placeholder_enabled());
}

#[test]
fn test_fill_then_clear() {
    let _app = app();
    let mut field = FloatingPlaceholderField::new(field_rect());
    field.set_placeholder("Email");

    field.set_text("abc");
    assert_eq!(field.state(), PlaceholderState::Filled);
    assert_eq!(field.label().presented_alpha(), 1.0);
    assert_eq!(field.label().font_size(), 15.0);
    assert_eq!(field.label_vertical_offset(), -19.0);

    field.set_text("");
    assert_eq!(field.state(), PlaceholderState::Empty);
    assert_eq!(field.label().presented_alpha(), 0.0);
    assert_eq!(field.label().font_size(), 17.0);
    assert_eq!(field.label_vertical_offset(), 0.0);
}

#[test]
fn test_accessory_width_moves_label() {
    let _app = app();
    let mut field = FloatingPlaceholderField::new(field_rect());
    field.set_accessory(Some(Accessory::new(30.0).glyph("×")));
    field.set_text("abc");
    assert_eq!(field.label_horizontal_offset(), -30.0);

    if let Some(accessory) = field.accessory_mut() {
        accessory.set_width(44.0);
    }
    field.set_text("abcd");
    assert_eq!(field.label_horizontal_offset(), -44.0);
}

#[test]
fn test_frames_show_label_only_when_filled() {
    let mut app = app();
    let mut field = FloatingPlaceholderField::new(field_rect());
    field.set_placeholder("Email");
    let now = Instant::now();

    let empty = app.frame(&mut field, now);
    let inline = label_command(&empty, "Email");
    assert_eq!(
        empty.commands.iter().filter(|c| c.text() == Some("Email")).count(),
        1,
        "only the inline placeholder is visible"
    );
    assert!(inline.is_some_and(|c| c.rect().y >= 60.0));

    field.set_text("abc");
    let filled = app.frame(&mut field, now);
    let label = label_command(&filled, "Email");
    assert!(label.as_ref().is_some_and(|c| c.rect().y < 60.0));
    assert!(label.is_some_and(|c| c.color().a == 1.0));
    assert!(!filled.animating);
}

#[test]
fn test_typing_through_app_dispatch() {
    let mut app = app();
    let mut field = FloatingPlaceholderField::new(field_rect());
    field.set_placeholder("Name");
    app.frame(&mut field, Instant::now());

    app.dispatch(
        &mut field,
        &Event::MouseDown {
            x: 30.0,
            y: 80.0,
            button: MouseButton::Left,
        },
    );
    for c in "Ada".chars() {
        app.dispatch(&mut field, &Event::key(Key::Char(c)));
    }
    assert_eq!(field.text(), "Ada");
    assert_eq!(field.state(), PlaceholderState::Filled);

    for _ in 0..3 {
        app.dispatch(&mut field, &Event::key(Key::Backspace));
    }
    assert_eq!(field.state(), PlaceholderState::Empty);
    assert_eq!(field.label().presented_alpha(), 0.0);
}

#[test]
fn test_animated_transition_completes() {
    let mut app = App::with_config(AppConfig {
        animations: AnimationSettings::default(),
        ..Default::default()
    });
    let mut field = FloatingPlaceholderField::new(field_rect());
    field.set_placeholder("Email");
    let start = Instant::now();
    app.frame(&mut field, start);

    field.set_text("abc");
    let mid = app.frame(&mut field, start + Duration::from_millis(200));
    assert!(mid.animating);
    assert!(field.presented_label().alpha < 1.0);

    let last = app.run_until_idle(
        &mut field,
        start + Duration::from_millis(216),
        Duration::from_millis(16),
        100,
    );
    assert!(!last.animating);
    assert_eq!(field.presented_label().alpha, 1.0);
    assert_eq!(field.presented_label().offset_y, -19.0);
}

#[test]
fn test_edit_after_idle_still_animates() {
    let mut app = App::with_config(AppConfig {
        animations: AnimationSettings::default(),
        ..Default::default()
    });
    let mut field = FloatingPlaceholderField::new(field_rect());
    field.set_placeholder("Email");
    let t0 = Instant::now();
    let settled = app.frame(&mut field, t0);
    assert!(!settled.animating);

    // No frames while the host is idle
    field.set_text("abc");

    let first = app.frame(&mut field, t0 + Duration::from_secs(3));
    assert!(first.animating);
    assert_eq!(field.presented_label().alpha, 0.0);

    let second = app.frame(&mut field, t0 + Duration::from_secs(3) + Duration::from_millis(250));
    assert!(second.animating);
    let alpha = field.presented_label().alpha;
    assert!(alpha > 0.0 && alpha < 1.0, "alpha {alpha}");
    assert!(label_command(&second, "Email").is_some_and(|c| c.color().a < 1.0));
}

#[test]
fn test_underline_under_field() {
    let mut app = app();
    let mut field = FloatingPlaceholderField::new(field_rect());
    field.enable_underline(true);
    let frame = app.frame(&mut field, Instant::now());

    let bars: Vec<_> = frame
        .commands
        .iter()
        .filter(|c| c.text().is_none() && c.color() == Color::GRAY)
        .collect();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].rect(), Rect::new(20.0, 103.5, 280.0, 0.5));
}
