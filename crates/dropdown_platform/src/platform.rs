//! Platform trait and abstraction

use crate::error::{PlatformError, Result};
use crate::main_queue::MainQueue;

/// Platform abstraction trait
///
/// Implemented by each backend (android, ios) to expose the display metrics
/// and the main-thread queue its native widgets run on.
pub trait Platform {
    /// Create a platform instance with the system's default metrics
    fn new() -> Result<Self>
    where
        Self: Sized;

    /// Get the platform name
    ///
    /// Returns a string like "android" or "ios".
    fn name(&self) -> &'static str;

    /// Display scale factor (Android density, UIKit screen scale)
    fn scale_factor(&self) -> f64;

    /// Queue for work deferred to the next main-loop tick
    fn main_queue(&self) -> &MainQueue;

    /// Convert device-independent units to device pixels
    fn dp_to_px(&self, dp: f32) -> f32 {
        dp * self.scale_factor() as f32
    }
}

/// Validate a scale factor reported by the system
pub fn checked_scale_factor(scale_factor: f64) -> Result<f64> {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        Ok(scale_factor)
    } else {
        Err(PlatformError::InvalidDensity(scale_factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_scale_factor() {
        assert_eq!(checked_scale_factor(2.0).unwrap(), 2.0);
        assert!(matches!(
            checked_scale_factor(0.0),
            Err(PlatformError::InvalidDensity(_))
        ));
        assert!(checked_scale_factor(f64::NAN).is_err());
    }
}
