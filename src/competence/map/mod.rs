pub mod error;
pub mod flatten;
pub mod generate;
pub mod io;
pub mod model;

pub use error::{MapError, Result};
