mod client;
mod error;
mod traits;

pub use client::*;
pub use error::*;
pub use traits::*;
