mod domain;
mod mongo;
mod ws;

pub use domain::*;
pub use mongo::*;
pub use ws::*;

// Re-export mocks when testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use domain::MockEventSink;
#[cfg(any(test, feature = "testing"))]
pub use ws::MockCloseControl;
#[cfg(any(test, feature = "testing"))]
pub use ws::MockFrameSource;
