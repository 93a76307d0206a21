//! Slider host application and its terminal run loop.
//!
//! [`SliderApp`] owns the sliders and does what a widget toolkit would do for
//! them: it stacks them one per row, tracks keyboard focus, hit-tests pointer
//! presses, and routes motion and release to whichever slider holds capture.

use crate::buffer::CellBuffer;
use crate::config::DemoConfig;
use crate::error::TuiError;
use crate::input::{Action, InputHandler};
use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent, KeyEventKind},
    execute, queue,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::{self, Stdout, Write};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;
use thinslider_core::{Canvas, Event, Key, Point, Rect, Size, Widget};
use thinslider_widgets::{ChangeNotifier, SliderChanged, ThinSlider};

const TITLE: &str = "thinslider  [←/→] step  [tab] focus  [q] quit";
const FIRST_SLIDER_ROW: u16 = 2;
const ROW_STRIDE: u16 = 2;
/// Columns reserved left and right of each slider; the focus marker sits in the left one.
const MARGIN: u16 = 2;

// =============================================================================
// Terminal abstraction
// =============================================================================

/// Terminal abstraction for testability.
pub trait Terminal {
    /// Enter raw mode and alternate screen.
    fn enter(&mut self) -> Result<(), TuiError>;
    /// Leave alternate screen and raw mode.
    fn leave(&mut self) -> Result<(), TuiError>;
    /// Get terminal size (width, height).
    fn size(&self) -> Result<(u16, u16), TuiError>;
    /// Poll for events with timeout.
    fn poll(&self, timeout: Duration) -> Result<bool, TuiError>;
    /// Read the next event.
    fn read_event(&self) -> Result<CrosstermEvent, TuiError>;
    /// Write a full frame.
    fn draw(&mut self, buffer: &CellBuffer) -> Result<(), TuiError>;
    /// Enable mouse capture.
    fn enable_mouse(&mut self) -> Result<(), TuiError>;
    /// Disable mouse capture.
    fn disable_mouse(&mut self) -> Result<(), TuiError>;
}

/// Real crossterm terminal writing escape sequences to `W`.
#[derive(Debug)]
pub struct CrosstermTerminal<W: Write> {
    out: W,
}

impl CrosstermTerminal<Stdout> {
    /// Terminal on the process's stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CrosstermTerminal<W> {
    /// Wrap a writer.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Get the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Terminal for CrosstermTerminal<W> {
    fn enter(&mut self) -> Result<(), TuiError> {
        enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, cursor::Hide)?;
        Ok(())
    }

    fn leave(&mut self) -> Result<(), TuiError> {
        // Best effort: every step runs even if an earlier one failed.
        let shown = execute!(self.out, cursor::Show, LeaveAlternateScreen);
        let raw = disable_raw_mode();
        shown?;
        raw?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16), TuiError> {
        Ok(crossterm::terminal::size()?)
    }

    fn poll(&self, timeout: Duration) -> Result<bool, TuiError> {
        Ok(event::poll(timeout)?)
    }

    fn read_event(&self) -> Result<CrosstermEvent, TuiError> {
        Ok(event::read()?)
    }

    fn draw(&mut self, buffer: &CellBuffer) -> Result<(), TuiError> {
        for y in 0..buffer.height() {
            queue!(self.out, cursor::MoveTo(0, y), Print(buffer.row_text(y)))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn enable_mouse(&mut self) -> Result<(), TuiError> {
        execute!(self.out, event::EnableMouseCapture)?;
        Ok(())
    }

    fn disable_mouse(&mut self) -> Result<(), TuiError> {
        execute!(self.out, event::DisableMouseCapture)?;
        Ok(())
    }
}

/// In-memory terminal that replays queued events and records every frame.
///
/// A queued resize event also changes the reported size. Once the queue is
/// empty `read_event` fails, which ends the run loop.
#[derive(Debug)]
pub struct ScriptedTerminal {
    size: Cell<(u16, u16)>,
    events: RefCell<VecDeque<CrosstermEvent>>,
    frames: Vec<Vec<String>>,
    entered: bool,
    mouse_captured: bool,
}

impl ScriptedTerminal {
    /// Create a terminal of the given size with no queued events.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: Cell::new((width, height)),
            events: RefCell::new(VecDeque::new()),
            frames: Vec::new(),
            entered: false,
            mouse_captured: false,
        }
    }

    /// Queue events to be returned by `read_event`.
    #[must_use]
    pub fn with_events(self, events: impl IntoIterator<Item = CrosstermEvent>) -> Self {
        self.events.borrow_mut().extend(events);
        self
    }

    /// Frames drawn so far, as rows of text.
    #[must_use]
    pub fn frames(&self) -> &[Vec<String>] {
        &self.frames
    }

    /// Last frame drawn.
    #[must_use]
    pub fn last_frame(&self) -> Option<&[String]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Whether the terminal is in raw/alternate mode.
    #[must_use]
    pub const fn is_entered(&self) -> bool {
        self.entered
    }

    /// Whether mouse capture is on.
    #[must_use]
    pub const fn is_mouse_captured(&self) -> bool {
        self.mouse_captured
    }
}

impl Terminal for ScriptedTerminal {
    fn enter(&mut self) -> Result<(), TuiError> {
        self.entered = true;
        Ok(())
    }

    fn leave(&mut self) -> Result<(), TuiError> {
        self.entered = false;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16), TuiError> {
        Ok(self.size.get())
    }

    fn poll(&self, _timeout: Duration) -> Result<bool, TuiError> {
        Ok(true)
    }

    fn read_event(&self) -> Result<CrosstermEvent, TuiError> {
        let event = self
            .events
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| TuiError::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "no events")))?;
        if let CrosstermEvent::Resize(width, height) = event {
            self.size.set((width, height));
        }
        Ok(event)
    }

    fn draw(&mut self, buffer: &CellBuffer) -> Result<(), TuiError> {
        self.frames.push(buffer.lines());
        Ok(())
    }

    fn enable_mouse(&mut self) -> Result<(), TuiError> {
        self.mouse_captured = true;
        Ok(())
    }

    fn disable_mouse(&mut self) -> Result<(), TuiError> {
        self.mouse_captured = false;
        Ok(())
    }
}

// =============================================================================
// Application
// =============================================================================

/// Final state of one slider, as printed by `--json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderValue {
    /// User-assigned id, if any
    pub id: Option<String>,
    /// Current value
    pub value: i64,
    /// Percentage of the range covered by `value`
    pub percent: f64,
}

/// A column of sliders with focus, hit-testing and simulated capture.
#[derive(Debug)]
pub struct SliderApp {
    sliders: Vec<ThinSlider>,
    changes: Receiver<SliderChanged>,
    input: InputHandler,
    focus: usize,
    captured: Option<usize>,
    last_change: Option<SliderChanged>,
    size: Size,
    should_quit: bool,
}

impl SliderApp {
    /// Host `sliders`, top to bottom. Each slider's notifier is replaced by
    /// one feeding the app's status line.
    #[must_use]
    pub fn new(mut sliders: Vec<ThinSlider>) -> Self {
        let (tx, changes) = mpsc::channel();
        for slider in &mut sliders {
            slider.set_notifier(ChangeNotifier::sender(tx.clone()));
        }
        let mut app = Self {
            sliders,
            changes,
            input: InputHandler::with_default_bindings(),
            focus: 0,
            captured: None,
            last_change: None,
            size: Size::new(80, 24),
            should_quit: false,
        };
        app.layout();
        app
    }

    /// Build every slider described by `config`.
    pub fn from_config(config: &DemoConfig) -> Result<Self, TuiError> {
        let sliders = config
            .sliders
            .iter()
            .map(ThinSlider::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(sliders))
    }

    /// Replace the key bindings.
    #[must_use]
    pub fn with_input_handler(mut self, handler: InputHandler) -> Self {
        self.input = handler;
        self
    }

    /// Hosted sliders, top to bottom.
    #[must_use]
    pub fn sliders(&self) -> &[ThinSlider] {
        &self.sliders
    }

    /// Index of the focused slider.
    #[must_use]
    pub const fn focused(&self) -> usize {
        self.focus
    }

    /// Index of the slider holding pointer capture.
    #[must_use]
    pub const fn captured(&self) -> Option<usize> {
        self.captured
    }

    /// Most recent change message from any slider.
    #[must_use]
    pub const fn last_change(&self) -> Option<&SliderChanged> {
        self.last_change.as_ref()
    }

    /// Current screen size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Whether the app asked to exit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Request the application to quit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Final values of every slider.
    #[must_use]
    pub fn values(&self) -> Vec<SliderValue> {
        self.sliders
            .iter()
            .map(|s| SliderValue {
                id: s.name().map(str::to_string),
                value: s.get_value(),
                percent: s.percent(),
            })
            .collect()
    }

    /// Screen row of slider `index`.
    #[must_use]
    pub fn slider_row(index: usize) -> i32 {
        i32::from(FIRST_SLIDER_ROW) + i32::from(ROW_STRIDE) * index as i32
    }

    /// Lay sliders out for a new screen size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = Size::new(width, height);
        self.layout();
    }

    fn layout(&mut self) {
        let width = self.size.width.saturating_sub(MARGIN * 2);
        for (i, slider) in self.sliders.iter_mut().enumerate() {
            slider.layout(Rect::new(
                i32::from(MARGIN),
                Self::slider_row(i),
                width,
                1,
            ));
        }
    }

    /// Slider under a screen position.
    #[must_use]
    pub fn slider_at(&self, point: Point) -> Option<usize> {
        self.sliders
            .iter()
            .position(|s| s.bounds().contains_point(&point))
    }

    /// Handle one raw terminal event.
    ///
    /// Bound keys become actions; everything else is converted and passed to
    /// [`SliderApp::handle_event`].
    pub fn handle_terminal_event(&mut self, event: CrosstermEvent) {
        if let CrosstermEvent::Key(key) = &event {
            if key.kind == KeyEventKind::Release {
                return;
            }
            if let Some(action) = self.input.action_for(key) {
                self.apply(action);
                return;
            }
        }
        if let Some(event) = self.input.convert(event) {
            self.handle_event(&event);
        }
    }

    /// Perform a host action.
    pub fn apply(&mut self, action: Action) {
        let count = self.sliders.len();
        match action {
            Action::StepLeft => self.dispatch_focused(&Event::KeyDown { key: Key::Left }),
            Action::StepRight => self.dispatch_focused(&Event::KeyDown { key: Key::Right }),
            Action::FocusNext if count > 0 => self.set_focus((self.focus + 1) % count),
            Action::FocusPrev if count > 0 => self.set_focus((self.focus + count - 1) % count),
            Action::FocusNext | Action::FocusPrev => {}
            Action::Quit => self.quit(),
        }
        self.collect_changes();
    }

    /// Route a widget event.
    ///
    /// Presses go to the slider under the pointer and move focus there. While
    /// a slider holds capture, motion and release go to it wherever the
    /// pointer is.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::MouseDown { screen, .. } => {
                self.release_capture();
                if let Some(index) = self.slider_at(*screen) {
                    self.set_focus(index);
                    self.dispatch(index, event);
                    if self.sliders[index].has_capture() {
                        self.captured = Some(index);
                    }
                }
            }
            Event::MouseMove { .. } => {
                if let Some(index) = self.captured {
                    self.dispatch(index, event);
                }
            }
            Event::MouseUp { .. } => {
                if let Some(index) = self.captured.take() {
                    self.dispatch(index, event);
                }
            }
            Event::KeyDown { .. } => self.dispatch_focused(event),
            Event::Resize { width, height } => self.resize(*width, *height),
            Event::FocusOut => self.release_capture(),
            Event::FocusIn | Event::CaptureLost => {}
        }
        self.collect_changes();
    }

    fn dispatch(&mut self, index: usize, event: &Event) {
        let Some(slider) = self.sliders.get_mut(index) else {
            return;
        };
        let local = event.localized(slider.bounds().origin());
        // The returned message is a copy; changes are read from the shared channel.
        drop(slider.event(&local));
    }

    fn dispatch_focused(&mut self, event: &Event) {
        self.dispatch(self.focus, event);
    }

    fn set_focus(&mut self, index: usize) {
        if index == self.focus {
            return;
        }
        log::debug!("focus {} -> {index}", self.focus);
        self.dispatch(self.focus, &Event::FocusOut);
        self.focus = index;
        self.dispatch(self.focus, &Event::FocusIn);
    }

    fn release_capture(&mut self) {
        if let Some(index) = self.captured.take() {
            log::debug!("capture withdrawn from slider {index}");
            self.dispatch(index, &Event::CaptureLost);
        }
    }

    fn collect_changes(&mut self) {
        if let Some(change) = self.changes.try_iter().last() {
            self.last_change = Some(change);
        }
    }

    /// Text of the bottom status line.
    #[must_use]
    pub fn status_line(&self) -> String {
        let Some(change) = &self.last_change else {
            return "no changes yet".to_string();
        };
        let label = change.name.clone().unwrap_or_else(|| {
            let index = self
                .sliders
                .iter()
                .position(|s| s.widget_id() == change.slider)
                .unwrap_or(0);
            format!("slider {}", index + 1)
        });
        format!("{label}: {} ({:.1}%)", change.value, change.percent)
    }

    /// Paint the whole screen.
    pub fn render(&self, buffer: &mut CellBuffer) {
        buffer.clear();
        buffer.draw_text(TITLE, Point::ORIGIN);
        for (i, slider) in self.sliders.iter().enumerate() {
            if i == self.focus {
                buffer.draw_text(">", Point::new(0, Self::slider_row(i)));
            }
            slider.paint(buffer);
        }
        if buffer.height() > 1 {
            let row = i32::from(buffer.height()) - 1;
            buffer.draw_text(&self.status_line(), Point::new(0, row));
        }
    }
}

// =============================================================================
// Run loop
// =============================================================================

/// Run `app` on the real terminal until it quits.
pub fn run(app: &mut SliderApp, config: &DemoConfig) -> Result<(), TuiError> {
    run_with_terminal(app, &mut CrosstermTerminal::stdout(), config)
}

/// Run `app` on any [`Terminal`]. The terminal is restored even when the
/// loop fails.
pub fn run_with_terminal<T: Terminal>(
    app: &mut SliderApp,
    terminal: &mut T,
    config: &DemoConfig,
) -> Result<(), TuiError> {
    terminal.enter()?;
    let result = session(app, terminal, config);
    let restored = terminal.leave();
    result.and(restored)
}

fn session<T: Terminal>(
    app: &mut SliderApp,
    terminal: &mut T,
    config: &DemoConfig,
) -> Result<(), TuiError> {
    if !config.enable_mouse {
        return run_loop(app, terminal, config.tick_rate_ms);
    }
    terminal.enable_mouse()?;
    let result = run_loop(app, terminal, config.tick_rate_ms);
    result.and(terminal.disable_mouse())
}

fn run_loop<T: Terminal>(
    app: &mut SliderApp,
    terminal: &mut T,
    tick_rate_ms: u64,
) -> Result<(), TuiError> {
    let tick = Duration::from_millis(tick_rate_ms);
    let (width, height) = terminal.size()?;
    let mut buffer = CellBuffer::new(width, height);
    app.resize(width, height);
    log::info!("running {} slider(s) at {width}x{height}", app.sliders().len());

    loop {
        let (width, height) = terminal.size()?;
        if width != buffer.width() || height != buffer.height() {
            buffer.resize(width, height);
            app.resize(width, height);
        }

        app.render(&mut buffer);
        terminal.draw(&buffer)?;

        if app.should_quit() {
            break;
        }
        if terminal.poll(tick)? {
            let event = terminal.read_event()?;
            app.handle_terminal_event(event);
        }
    }

    log::info!("quit");
    Ok(())
}
