//! Optional tracing integration.
//!
//! With the `tracing-integration` feature enabled, the macros in this
//! module forward to the [`tracing`](https://docs.rs/tracing) crate. Without
//! it they expand to nothing, so call sites cost nothing at runtime and the
//! crate carries no logging dependency.
//!
//! ```ignore
//! use outcomes::tracing_compat::debug;
//!
//! debug!(folded = 3, "resolver advanced");
//! ```

#[cfg(feature = "tracing-integration")]
pub use tracing::{debug, error, info, trace, warn};

#[cfg(not(feature = "tracing-integration"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __outcomes_tracing_noop {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing-integration"))]
pub use crate::__outcomes_tracing_noop as trace;
#[cfg(not(feature = "tracing-integration"))]
pub use crate::__outcomes_tracing_noop as debug;
#[cfg(not(feature = "tracing-integration"))]
pub use crate::__outcomes_tracing_noop as info;
#[cfg(not(feature = "tracing-integration"))]
pub use crate::__outcomes_tracing_noop as warn;
#[cfg(not(feature = "tracing-integration"))]
pub use crate::__outcomes_tracing_noop as error;

/// Returns `true` when log macros are live.
#[must_use]
pub const fn enabled() -> bool {
    cfg!(feature = "tracing-integration")
}
