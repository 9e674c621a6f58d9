//! Device records resolved from the directory or an address list.

use serde::{Deserialize, Serialize};

/// A target bulb.
///
/// The `ip` is what the transport sends to. It is kept as text until send
/// time, so a malformed entry is reported per target rather than when the
/// directory is read. `name` and `room` only drive filtering and listing.
///
/// # Example
///
/// ```
/// use wizctl::Device;
///
/// let device = Device::new("Desk", "192.168.1.100", Some("Office"));
/// assert_eq!(device.ip(), "192.168.1.100");
/// assert_eq!(device.room(), Some("Office"));
///
/// let bare = Device::from_ip("10.0.0.7");
/// assert_eq!(bare.name(), "");
/// assert!(bare.room().is_none());
/// ```
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    name: String,
    ip: String,
    room: Option<String>,
}

impl Device {
    pub fn new(name: &str, ip: &str, room: Option<&str>) -> Self {
        Device {
            name: String::from(name),
            ip: String::from(ip),
            room: room.map(String::from),
        }
    }

    /// A record with no name or room, for targets given as raw addresses.
    pub fn from_ip(ip: &str) -> Self {
        Self::new("", ip, None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }
}
