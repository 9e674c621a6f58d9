//! Color temperature control.

use serde::{Deserialize, Serialize};

/// Color temperature in Kelvin, in the half-open range 2000K to 9000K.
///
/// Lower values produce warmer light, higher values cooler light.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Kelvin {
    pub(crate) kelvin: u16,
}

impl Kelvin {
    const MIN: u16 = 2000;
    const MAX: u16 = 8999;

    pub fn kelvin(&self) -> u16 {
        self.kelvin
    }

    /// Returns `None` if the value is outside `[2000, 9000)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wizctl::Kelvin;
    ///
    /// assert!(Kelvin::create(1999).is_none());
    /// assert!(Kelvin::create(2000).is_some());
    /// assert!(Kelvin::create(8999).is_some());
    /// assert!(Kelvin::create(9000).is_none());
    /// ```
    pub fn create(kelvin: u16) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&kelvin) {
            Some(Kelvin { kelvin })
        } else {
            None
        }
    }

    /// Clamp any value into range.
    ///
    /// # Examples
    ///
    /// ```
    /// use wizctl::Kelvin;
    ///
    /// assert_eq!(Kelvin::clamped(-100).kelvin(), 2000);
    /// assert_eq!(Kelvin::clamped(100).kelvin(), 2000);
    /// assert_eq!(Kelvin::clamped(4000).kelvin(), 4000);
    /// assert_eq!(Kelvin::clamped(12000).kelvin(), 8999);
    /// ```
    pub fn clamped(kelvin: i64) -> Self {
        let kelvin = kelvin.clamp(Self::MIN.into(), Self::MAX.into()) as u16;
        Kelvin { kelvin }
    }
}
