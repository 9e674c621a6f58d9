//! Transition speed for scenes and pilot changes.

use serde::{Deserialize, Serialize};

/// Transition speed, with valid values from 10 to 200.
///
/// Mostly affects animated scenes (Party, Ocean, ...).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Speed {
    pub(crate) value: u8,
}

impl Speed {
    const MIN: u8 = 10;
    const MAX: u8 = 200;

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns `None` if value is outside the valid range (10-200).
    ///
    /// # Examples
    ///
    /// ```
    /// use wizctl::Speed;
    ///
    /// assert!(Speed::create(9).is_none());
    /// assert!(Speed::create(10).is_some());
    /// assert!(Speed::create(200).is_some());
    /// assert!(Speed::create(201).is_none());
    /// ```
    pub fn create(value: u8) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Some(Speed { value })
        } else {
            None
        }
    }

    /// Clamp any value into range, as the command line does.
    ///
    /// # Examples
    ///
    /// ```
    /// use wizctl::Speed;
    ///
    /// assert_eq!(Speed::clamped(-4).value(), 10);
    /// assert_eq!(Speed::clamped(150).value(), 150);
    /// assert_eq!(Speed::clamped(999).value(), 200);
    /// ```
    pub fn clamped(value: i64) -> Self {
        let value = value.clamp(Self::MIN.into(), Self::MAX.into()) as u8;
        Speed { value }
    }
}
