mod envelope;
mod result;
mod sink;

pub use envelope::*;
pub use result::*;
pub use sink::*;
