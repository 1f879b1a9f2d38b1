pub mod colormap;
pub mod colorscale;
pub mod error;
pub mod field;
pub mod grid;
pub mod loader;
pub mod naming;
pub mod parameters;
pub mod pipeline;
pub mod png;
pub mod projection;
pub mod render;
pub mod text;
pub mod utils;

pub use error::{Error, Result};
