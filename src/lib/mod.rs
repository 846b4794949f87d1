pub mod disk;
pub mod error;
pub mod host;
pub mod logger;
pub mod net;
pub mod process;
pub mod text;

pub use error::{Error, Result};
