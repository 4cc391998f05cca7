//! DropDown Platform Abstraction Layer
//!
//! Platform-agnostic pieces shared by the native drop down backends:
//!
//! - [`Platform`] - display metrics and the main-thread queue
//! - [`MainQueue`] - single-threaded work deferred to the next tick
//! - [`PlatformError`] - errors raised while bringing a backend up
//!
//! # Platform Implementations
//!
//! - `dropdown_platform_android` - Spinner backend
//! - `dropdown_platform_ios` - Label + picker wheel backend
//!
//! # Example
//!
//! ```ignore
//! use dropdown_platform::*;
//! use dropdown_platform_android::AndroidPlatform;
//!
//! fn main() -> Result<()> {
//!     let platform = AndroidPlatform::new()?;
//!     let padding_px = platform.dp_to_px(4.0);
//!     platform.main_queue().run_pending();
//!     Ok(())
//! }
//! ```

mod error;
mod main_queue;
mod platform;

pub use error::{PlatformError, Result};
pub use main_queue::MainQueue;
pub use platform::{checked_scale_factor, Platform};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::main_queue::MainQueue;
    pub use crate::platform::Platform;
}
