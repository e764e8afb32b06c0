//! Process-wide runtime pieces of the RPA toolkit: the named resource
//! registry and logging bootstrap.
//!
//! The registry implements the "construct on first access, initialise on
//! demand" lifecycle every service client follows: `get` memoizes one handle
//! per name, `initialise` binds a client to it, and capability access on an
//! unbound handle fails with a named error instead of a hidden null.

pub mod error;
pub mod logging;
pub mod registry;

pub use error::{Result, RuntimeError};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use registry::{ResourceHandle, ResourceRegistry};
