//! Device discovery via UDP broadcast.

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use log::{debug, error};
use serde_json::Value;

use crate::device::Device;
use crate::directory::MAX_DEVICES;
use crate::errors::Error;
use crate::message::Message;
use crate::runtime::{self, AsyncUdpSocket};
use crate::transport::Transport;

type Result<T> = std::result::Result<T, Error>;

/// One datagram received in answer to a discovery query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryReply {
    source: SocketAddr,
    mac: Option<String>,
}

impl DiscoveryReply {
    pub fn source(&self) -> SocketAddr {
        self.source
    }

    pub fn ip(&self) -> IpAddr {
        self.source.ip()
    }

    /// The bulb's MAC address, when the reply carried one.
    pub fn mac(&self) -> Option<&str> {
        self.mac.as_deref()
    }

    /// Convert into an anonymous [`Device`] for a later unicast.
    pub fn into_device(self) -> Device {
        Device::from_ip(&self.source.ip().to_string())
    }
}

/// How long to listen and how many replies to accept.
///
/// # Examples
///
/// ```
/// use wizctl::DiscoveryOptions;
///
/// let opts: DiscoveryOptions = "2,3".parse().unwrap();
/// assert_eq!(opts.timeout_secs, 2);
/// assert_eq!(opts.max_replies, 3);
///
/// // a zero or negative quota means "as many as a directory can hold"
/// let opts: DiscoveryOptions = "0,-1".parse().unwrap();
/// assert_eq!(opts.timeout_secs, 1);
/// assert_eq!(opts.max_replies, 256);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Per-receive deadline in seconds, at least 1
    pub timeout_secs: u64,
    /// Stop after this many replies
    pub max_replies: usize,
}

impl DiscoveryOptions {
    pub fn new(timeout_secs: i64, max_replies: i64) -> Self {
        DiscoveryOptions {
            timeout_secs: timeout_secs.max(1) as u64,
            max_replies: if max_replies <= 0 {
                MAX_DEVICES
            } else {
                max_replies as usize
            },
        }
    }
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl FromStr for DiscoveryOptions {
    type Err = Error;

    /// Parse `TIMEOUT[,MAX_DEVS]`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidDiscovery(s.to_string());
        let mut parts = s.splitn(2, ',').map(|p| p.trim().parse::<i64>());

        let timeout = parts.next().ok_or_else(invalid)?.map_err(|_| invalid())?;
        let max = match parts.next() {
            Some(max) => max.map_err(|_| invalid())?,
            None => 0,
        };
        Ok(Self::new(timeout, max))
    }
}

fn extract_mac(payload: &[u8]) -> Option<String> {
    let json: Value = serde_json::from_slice(payload).ok()?;
    json.get("result")
        .and_then(|r| r.get("mac"))
        .and_then(|m| m.as_str())
        .map(String::from)
}

impl Transport {
    /// Broadcast `query` and collect replies.
    ///
    /// Each receive waits up to `max(timeout_secs, 1)` seconds. Discovery ends
    /// successfully when a receive times out or `max_replies` replies have
    /// arrived (`0` means [`MAX_DEVICES`]). Any other receive error aborts it.
    /// Replies are not deduplicated: a bulb answering twice is listed twice.
    pub async fn discover(
        &self,
        query: &Message,
        timeout_secs: u64,
        max_replies: usize,
    ) -> Result<Vec<DiscoveryReply>> {
        let socket = self.bind(true).await?;
        let target = self.broadcast_target();
        socket
            .send_to(query.as_bytes(), target)
            .await
            .map_err(|source| Error::Send {
                target: target.to_string(),
                source,
            })?;
        debug!("discovery query sent to {target}");

        collect_replies(&socket, timeout_secs, max_replies).await
    }

    /// Send the `getDevInfo` query and collect replies as `options` says.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use wizctl::{DiscoveryOptions, Transport};
    ///
    /// let replies = Transport::default()
    ///     .discover_bulbs(&DiscoveryOptions::new(2, 0))
    ///     .await?;
    /// for reply in replies {
    ///     println!("{}", reply.ip());
    /// }
    /// ```
    pub async fn discover_bulbs(
        &self,
        options: &DiscoveryOptions,
    ) -> Result<Vec<DiscoveryReply>> {
        let query = Message::discovery()?;
        self.discover(&query, options.timeout_secs, options.max_replies)
            .await
    }
}

async fn collect_replies<S: AsyncUdpSocket>(
    socket: &S,
    timeout_secs: u64,
    max_replies: usize,
) -> Result<Vec<DiscoveryReply>> {
    let deadline = Duration::from_secs(timeout_secs.max(1));
    let quota = if max_replies == 0 {
        MAX_DEVICES
    } else {
        max_replies
    };

    let mut replies = Vec::new();
    let mut buffer = [0u8; 4096];

    while replies.len() < quota {
        match runtime::timeout(deadline, socket.recv_from(&mut buffer)).await {
            Ok(Ok((size, source))) => {
                debug!("discovery reply from {source} ({size} bytes)");
                replies.push(DiscoveryReply {
                    source,
                    mac: extract_mac(&buffer[..size]),
                });
            }
            Ok(Err(e)) if is_timeout(&e) => break,
            Ok(Err(e)) => {
                error!("discovery receive failed: {e}");
                return Err(Error::Receive(e));
            }
            Err(_) => break,
        }
    }

    debug!("discovery finished with {} replies", replies.len());
    Ok(replies)
}

fn is_timeout(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
    )
}
