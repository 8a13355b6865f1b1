//! Helper functions shared by the renderer and the generators

mod date;
mod html;

pub use date::*;
pub use html::*;
