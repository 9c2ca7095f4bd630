pub mod domain;
pub mod ingest_worker;
pub mod mongo;
pub mod shutdown;

pub use domain::*;
pub use ingest_worker::*;
pub use mongo::*;
pub use shutdown::*;
