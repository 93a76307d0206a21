//! Terminal host for thinslider.
//!
//! This crate bridges `thinslider_core` abstractions (Canvas, Widget, Event) to
//! the terminal using `crossterm` directly, and ships the `thinslider-demo`
//! binary.
//!
//! # Example
//!
//! ```no_run
//! use thinslider_terminal::{run, DemoConfig, SliderApp};
//!
//! let config = DemoConfig::default();
//! let mut app = SliderApp::from_config(&config)?;
//! run(&mut app, &config)?;
//! # Ok::<(), thinslider_terminal::TuiError>(())
//! ```

mod app;
mod buffer;
mod config;
mod error;
mod input;

pub use app::{
    run, run_with_terminal, CrosstermTerminal, ScriptedTerminal, SliderApp, SliderValue, Terminal,
};
pub use buffer::{Cell, CellBuffer};
pub use config::DemoConfig;
pub use error::TuiError;
pub use input::{Action, InputHandler, KeyBinding};
