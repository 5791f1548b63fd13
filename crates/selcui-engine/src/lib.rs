//! Selection overlay engine crate.
//!
//! Owns the selection model driven by the wire protocol, the render batching
//! sink with its backend chain, and the platform + GPU runtime used to host
//! the overlay.
//!
//! Data flows one way: raw messages are decoded and applied to
//! [`selection::Selections`] by [`event::Dispatcher`]; once per frame the
//! [`frame::WorldRenderer`] asks the selections to draw themselves through
//! the active [`render::RenderSink`].

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod config;
pub mod style;
pub mod render;
pub mod shapes;
pub mod region;
pub mod selection;
pub mod event;
pub mod session;
pub mod frame;
