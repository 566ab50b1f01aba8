use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use floatlabel::prelude::*;

fn disabled_app() -> App {
    App::with_config(AppConfig {
        animations: AnimationSettings::disabled(),
        ..Default::default()
    })
}

#[test]
fn test_bound_signal_moves_label_on_next_frame() {
    let mut app = disabled_app();
    let email = create_signal(String::new());

    let mut field = FloatingPlaceholderField::new(Rect::new(0.0, 40.0, 280.0, 40.0));
    field.set_placeholder("Email");
    field.bind_text(email.clone());
    app.frame(&mut field, Instant::now());
    assert_eq!(field.state(), PlaceholderState::Empty);

    email.set("ada@example.com".to_string());
    app.frame(&mut field, Instant::now());

    assert_eq!(field.text(), "ada@example.com");
    assert_eq!(field.state(), PlaceholderState::Filled);
    assert_eq!(field.label().presented_alpha(), 1.0);

    email.set(String::new());
    app.frame(&mut field, Instant::now());
    assert_eq!(field.state(), PlaceholderState::Empty);
    assert_eq!(field.label().presented_alpha(), 0.0);
}

#[test]
fn test_update_callback_drives_signal() {
    let name = create_signal(String::new());
    let pending = Rc::new(RefCell::new(vec!["G".to_string(), "Grace".to_string()]));

    let mut app = disabled_app().on_update({
        let name = name.clone();
        let pending = pending.clone();
        move || {
            if let Some(next) = pending.borrow_mut().pop() {
                name.set(next);
            }
        }
    });

    let mut field = FloatingPlaceholderField::new(Rect::new(0.0, 40.0, 280.0, 40.0));
    field.bind_text(name);

    app.frame(&mut field, Instant::now());
    assert_eq!(field.text(), "Grace");
    app.frame(&mut field, Instant::now());
    assert_eq!(field.text(), "G");
    assert_eq!(field.state(), PlaceholderState::Filled);
}

#[test]
fn test_effect_observes_typed_text() {
    let _app = disabled_app();
    let typed = create_signal(String::new());
    let lengths = Rc::new(RefCell::new(Vec::new()));

    let _effect = create_effect({
        let typed = typed.clone();
        let lengths = lengths.clone();
        move || lengths.borrow_mut().push(typed.with(|t| t.chars().count()))
    });

    let mut field = FloatingPlaceholderField::new(Rect::new(0.0, 40.0, 280.0, 40.0));
    field.input_mut().subscribe({
        let typed = typed.clone();
        move |text| typed.set(text.to_string())
    });

    field.event(&Event::FocusIn);
    for c in "hé".chars() {
        field.event(&Event::key(Key::Char(c)));
    }

    assert_eq!(*lengths.borrow(), vec![0, 1, 2]);
    assert_eq!(field.state(), PlaceholderState::Filled);
}
