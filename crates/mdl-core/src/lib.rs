pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod resolver;
pub mod retriever;

pub use error::{MdlError, Result};
