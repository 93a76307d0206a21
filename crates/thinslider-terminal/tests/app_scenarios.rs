//! End-to-end runs of the slider host against a scripted terminal.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use thinslider_terminal::{run_with_terminal, DemoConfig, ScriptedTerminal, SliderApp};

const CONFIG: &str = r#"
tick_rate_ms = 0
enable_mouse = true

[[sliders]]
id = "coarse"
min = 0
max = 79

[[sliders]]
id = "volume"
min = 0
max = 100
value = 100
display = "percent-right"

[[sliders]]
id = "offset"
min = 72
max = 325
display = "position-left"
"#;

fn key(code: KeyCode) -> CrosstermEvent {
    CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermEvent {
    CrosstermEvent::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn app() -> (SliderApp, DemoConfig) {
    let config = DemoConfig::from_toml_str(CONFIG).expect("valid config");
    let app = SliderApp::from_config(&config).expect("valid sliders");
    (app, config)
}

#[test]
fn renders_every_slider_on_its_own_row() {
    let (mut app, config) = app();
    // 24 columns leaves each slider 20 cells.
    let mut terminal = ScriptedTerminal::new(24, 9).with_events([key(KeyCode::Char('q'))]);

    run_with_terminal(&mut app, &mut terminal, &config).expect("clean exit");

    let frame = terminal.last_frame().expect("a frame");
    assert_eq!(frame[2], "> [                  ]  ");
    assert_eq!(frame[4], "  [██████████████]100%  ");
    assert_eq!(frame[6], format!("   72[{}]  ", " ".repeat(15)));
    assert_eq!(frame[8].trim_end(), "no changes yet");
}

#[test]
fn keyboard_steps_and_focus() {
    let (mut app, config) = app();
    let mut terminal = ScriptedTerminal::new(24, 9).with_events([
        key(KeyCode::Right),
        key(KeyCode::Right),
        key(KeyCode::Down),
        key(KeyCode::Right),
        key(KeyCode::Down),
        key(KeyCode::Left),
        key(KeyCode::Esc),
    ]);

    run_with_terminal(&mut app, &mut terminal, &config).expect("clean exit");

    let values: Vec<i64> = app.values().iter().map(|v| v.value).collect();
    assert_eq!(values, vec![2, 100, 72]);
    assert_eq!(app.focused(), 2);

    // Stepping left at the minimum still reports a change.
    let frame = terminal.last_frame().expect("a frame");
    assert_eq!(frame[8].trim_end(), "offset: 72 (0.0%)");
}

#[test]
fn drag_outside_the_row_keeps_control() {
    let (mut app, config) = app();
    let left = MouseButton::Left;
    let mut terminal = ScriptedTerminal::new(14, 9).with_events([
        mouse(MouseEventKind::Down(left), 3, 2),
        mouse(MouseEventKind::Drag(left), 5, 7),
        mouse(MouseEventKind::Drag(left), 60, 0),
        mouse(MouseEventKind::Up(left), 60, 0),
        mouse(MouseEventKind::Moved, 3, 2),
        key(KeyCode::Char('q')),
    ]);

    run_with_terminal(&mut app, &mut terminal, &config).expect("clean exit");

    assert_eq!(app.values()[0].value, 79);
    assert_eq!(app.captured(), None);
}

#[test]
fn click_sequence_matches_pointer_model() {
    let (mut app, config) = app();
    let left = MouseButton::Left;
    // Slider 0 body starts at screen column 3 (margin 2 + bracket).
    let mut terminal = ScriptedTerminal::new(14, 9).with_events([
        mouse(MouseEventKind::Down(left), 3, 2),
        mouse(MouseEventKind::Drag(left), 6, 2),
        mouse(MouseEventKind::Up(left), 6, 2),
        mouse(MouseEventKind::Down(left), 4, 2),
        mouse(MouseEventKind::Up(left), 4, 2),
        key(KeyCode::Char('q')),
    ]);

    run_with_terminal(&mut app, &mut terminal, &config).expect("clean exit");

    assert_eq!(app.values()[0].value, 20);
    assert_eq!(
        app.last_change().and_then(|c| c.name.as_deref()),
        Some("coarse")
    );
}

#[test]
fn final_values_serialize() {
    let (mut app, config) = app();
    let mut terminal = ScriptedTerminal::new(24, 9).with_events([
        key(KeyCode::Tab),
        key(KeyCode::Left),
        key(KeyCode::Char('q')),
    ]);

    run_with_terminal(&mut app, &mut terminal, &config).expect("clean exit");

    let json = serde_json::to_value(app.values()).expect("serializable");
    assert_eq!(json[1]["id"], "volume");
    assert_eq!(json[1]["value"], 99);
    assert_eq!(json[1]["percent"], 99.0);
    assert_eq!(json[2]["value"], 72);
}

#[test]
fn terminal_released_after_run() {
    let (mut app, config) = app();
    let mut terminal = ScriptedTerminal::new(24, 9).with_events([key(KeyCode::Char('q'))]);
    run_with_terminal(&mut app, &mut terminal, &config).expect("clean exit");
    assert!(!terminal.is_entered());
    assert!(!terminal.is_mouse_captured());
}
