//! BattleCam: a small always-on-top webcam window with a nickname label,
//! for presenters who want their face next to their slides.
//!
//! Every ~33 ms the refresh loop grabs a camera frame, composites the label
//! in the bottom-left corner, repacks the pixels for the window and shows it.

pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod convert;
pub mod display;
pub mod error;
pub mod font;
pub mod overlay;
pub mod pipeline;
pub mod scheduler;
pub mod screen;
pub mod types;

pub use error::Error;
