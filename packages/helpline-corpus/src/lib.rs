pub mod cache;
pub mod historical;
pub mod kb;
pub mod manual;
pub mod models;

mod error;

pub use error::{Error, Result};
