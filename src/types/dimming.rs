//! Brightness modifier.

use std::num::NonZeroU8;

/// Brightness percentage from 0 to 100.
///
/// The level is held offset by one, so a raw value of zero always means
/// "not set" and never collides with a 0% request. [`Dimming::percent`]
/// reverses the offset; that is the value written on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimming(NonZeroU8);

impl Dimming {
    const MAX: u8 = 100;

    /// Returns `None` if `percent` is above 100.
    ///
    /// # Examples
    ///
    /// ```
    /// use wizctl::Dimming;
    ///
    /// assert_eq!(Dimming::create(0).unwrap().percent(), 0);
    /// assert_eq!(Dimming::create(100).unwrap().percent(), 100);
    /// assert!(Dimming::create(101).is_none());
    /// ```
    pub fn create(percent: u8) -> Option<Self> {
        if percent <= Self::MAX {
            NonZeroU8::new(percent + 1).map(Dimming)
        } else {
            None
        }
    }

    /// Clamp any value into `0..=100`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wizctl::Dimming;
    ///
    /// assert_eq!(Dimming::clamped(-20).percent(), 0);
    /// assert_eq!(Dimming::clamped(50).percent(), 50);
    /// assert_eq!(Dimming::clamped(300).percent(), 100);
    /// ```
    pub fn clamped(percent: i64) -> Self {
        let percent = percent.clamp(0, Self::MAX.into()) as u8;
        // percent + 1 is in 1..=101
        Dimming(NonZeroU8::MIN.saturating_add(percent))
    }

    pub fn percent(&self) -> u8 {
        self.0.get() - 1
    }
}
