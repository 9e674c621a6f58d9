use std::net::AddrParseError;
use std::path::PathBuf;

/// All error types that can occur while resolving, encoding or sending commands.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The directory text contains no complete record.
    #[error("malformed directory at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// More devices than the directory can hold.
    #[error("too many devices; at most {capacity} are supported")]
    CapacityExceeded { capacity: usize },

    /// A target's address is not a valid IPv4 address.
    #[error("invalid device address {ip:?}: {source}")]
    Address {
        ip: String,
        #[source]
        source: AddrParseError,
    },

    /// A datagram could not be sent to one target.
    #[error("failed to send to {target}: {source}")]
    Send {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Discovery failed for a reason other than the receive deadline.
    #[error("discovery receive failed: {0}")]
    Receive(#[source] std::io::Error),

    /// Failed to serialize a message to JSON.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// A socket could not be set up.
    #[error("socket {action} error: {err:?}")]
    Socket { action: String, err: std::io::Error },

    /// Some sends of a batch failed; all targets were attempted.
    #[error("{failed} of {attempted} sends failed")]
    PartialFailure { failed: usize, attempted: usize },

    /// A scene name that is not in the scene table.
    #[error("unknown scene {0:?}")]
    BadScene(String),

    /// Failed to parse a [`crate::Color`] from a string.
    #[error("invalid color string: {0}")]
    InvalidColorString(String),

    /// Discovery parameters not in `TIMEOUT,MAX_DEVS` form.
    #[error("invalid discovery parameters {0:?}; expected TIMEOUT,MAX_DEVS")]
    InvalidDiscovery(String),

    /// The directory file could not be read.
    #[error("unable to read device directory {path:?}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("device directory {0:?} is empty")]
    EmptyDirectory(PathBuf),

    /// Nothing in the directory matched the selection.
    #[error("no devices read from the directory")]
    NoDevices,

    /// An address list with no addresses in it.
    #[error("unable to parse ip addresses from {0:?}")]
    EmptyAddressList(String),
}

impl Error {
    /// Create a new socket error
    pub fn socket(action: &str, err: std::io::Error) -> Self {
        Error::Socket {
            action: action.to_string(),
            err,
        }
    }

    pub(crate) fn parse(line: usize, reason: &str) -> Self {
        Error::Parse {
            line,
            reason: reason.to_string(),
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
