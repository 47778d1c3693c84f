pub mod color;
pub mod geo;
pub mod time;

pub use color::*;
pub use geo::*;
pub use time::*;
