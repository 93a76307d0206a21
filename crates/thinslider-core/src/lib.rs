//! Core types and traits for the thinslider range selector.
//!
//! This crate provides the host-facing vocabulary the widgets are written against:
//! - Cell geometry: [`Point`], [`Size`], [`Rect`]
//! - Layout constraints: [`Constraints`]
//! - Input: [`Event`], [`Key`], [`MouseButton`]
//! - Rendering: [`Widget`], [`Canvas`], [`RecordingCanvas`]

mod canvas;
mod constraints;
mod event;
mod geometry;
pub mod widget;

pub use canvas::{DrawCommand, RecordingCanvas};
pub use constraints::Constraints;
pub use event::{Event, Key, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use widget::{AccessibleRole, Canvas, LayoutResult, TypeId, Widget, WidgetId};
