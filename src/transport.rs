//! UDP transport to bulbs.

use std::net::{Ipv4Addr, SocketAddr};

use log::{debug, warn};

use crate::device::Device;
use crate::errors::Error;
use crate::message::Message;
use crate::runtime::{AsyncUdpSocket, UdpSocket};

type Result<T> = std::result::Result<T, Error>;

/// UDP port bulbs listen on.
pub const PORT: u16 = 38899;

/// Where the transport binds and sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Destination port for every datagram
    pub port: u16,
    /// Local bind address (an ephemeral port is always used)
    pub bind_addr: Ipv4Addr,
    /// Destination of broadcasts and discovery queries
    pub broadcast_addr: Ipv4Addr,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            port: PORT,
            bind_addr: Ipv4Addr::UNSPECIFIED,
            broadcast_addr: Ipv4Addr::BROADCAST,
        }
    }
}

/// What to do with a target whose address does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AddressPolicy {
    /// Abort the batch. Earlier targets have already been sent to; later
    /// ones are not attempted.
    FailFast,
    /// Record the target as failed and carry on with the rest.
    #[default]
    BestEffort,
}

/// Outcome of sending one message to a batch of targets.
#[derive(Debug, Default)]
pub struct SendReport {
    sent: usize,
    failures: Vec<Error>,
}

impl SendReport {
    pub fn sent(&self) -> usize {
        self.sent
    }

    pub fn attempted(&self) -> usize {
        self.sent + self.failures.len()
    }

    /// Per-target errors, in send order.
    pub fn failures(&self) -> &[Error] {
        &self.failures
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn merge(&mut self, other: SendReport) {
        self.sent += other.sent;
        self.failures.extend(other.failures);
    }

    /// Collapse into an error if any target failed.
    pub fn into_result(self) -> Result<usize> {
        if self.is_success() {
            Ok(self.sent)
        } else {
            Err(Error::PartialFailure {
                failed: self.failures.len(),
                attempted: self.attempted(),
            })
        }
    }
}

/// Sends datagrams to bulbs.
///
/// Every operation binds its own socket and drops it before returning, on
/// success and on error alike. Sends within an operation are sequential and
/// each target gets exactly one attempt.
#[derive(Debug, Clone, Default)]
pub struct Transport {
    config: TransportConfig,
}

impl Transport {
    pub fn new(config: TransportConfig) -> Self {
        Transport { config }
    }

    pub(crate) fn broadcast_target(&self) -> SocketAddr {
        SocketAddr::from((self.config.broadcast_addr, self.config.port))
    }

    pub(crate) async fn bind(&self, broadcast: bool) -> Result<UdpSocket> {
        let socket = UdpSocket::bind(SocketAddr::from((self.config.bind_addr, 0)))
            .await
            .map_err(|e| Error::socket("bind", e))?;

        if broadcast {
            socket
                .set_broadcast(true)
                .map_err(|e| Error::socket("set_broadcast", e))?;
        }
        Ok(socket)
    }

    /// Send `message` to each target in order.
    ///
    /// Send failures are logged and recorded in the report without stopping
    /// the batch. Unparseable addresses are handled according to `policy`.
    pub async fn send_unicast(
        &self,
        targets: &[Device],
        message: &Message,
        policy: AddressPolicy,
    ) -> Result<SendReport> {
        let socket = self.bind(false).await?;
        let mut report = SendReport::default();

        for target in targets {
            let ip = match target.ip().parse::<Ipv4Addr>() {
                Ok(ip) => ip,
                Err(source) => {
                    let err = Error::Address {
                        ip: target.ip().to_string(),
                        source,
                    };
                    match policy {
                        AddressPolicy::FailFast => return Err(err),
                        AddressPolicy::BestEffort => {
                            warn!("{err}");
                            report.failures.push(err);
                            continue;
                        }
                    }
                }
            };

            let addr = SocketAddr::from((ip, self.config.port));
            match socket.send_to(message.as_bytes(), addr).await {
                Ok(_) => {
                    debug!("sent {} bytes to {addr}: {message}", message.len());
                    report.sent += 1;
                }
                Err(source) => {
                    warn!("error sending to {addr}: {source}");
                    report.failures.push(Error::Send {
                        target: addr.to_string(),
                        source,
                    });
                }
            }
        }

        Ok(report)
    }

    /// Send `message` once to the broadcast address. No replies are read.
    pub async fn send_broadcast(&self, message: &Message) -> Result<()> {
        let socket = self.bind(true).await?;
        let target = self.broadcast_target();

        socket
            .send_to(message.as_bytes(), target)
            .await
            .map_err(|source| Error::Send {
                target: target.to_string(),
                source,
            })?;

        debug!("broadcast {} bytes to {target}: {message}", message.len());
        Ok(())
    }
}
