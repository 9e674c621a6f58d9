//! Fan one operation out to a set of targets.

use log::{debug, warn};

use crate::device::Device;
use crate::errors::Error;
use crate::message::Message;
use crate::operation::Operation;
use crate::transport::{AddressPolicy, SendReport, Transport};

type Result<T> = std::result::Result<T, Error>;

/// Encodes an operation once and sends it to every target.
///
/// `repeat` is the number of extra rounds: with `repeat = 2` every target
/// receives the message three times.
///
/// # Example
///
/// ```ignore
/// use wizctl::{directory, Dispatcher, Operation, Transport};
///
/// let devices = directory::parse(b"Desk,192.168.1.20\n", None, None)?;
/// let report = Dispatcher::new(Transport::default())
///     .dispatch(&devices, &Operation::PowerOff)
///     .await?;
/// report.into_result()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    transport: Transport,
    policy: AddressPolicy,
    repeat: usize,
}

impl Dispatcher {
    pub fn new(transport: Transport) -> Self {
        Dispatcher {
            transport,
            ..Self::default()
        }
    }

    pub fn policy(mut self, policy: AddressPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn repeat(mut self, repeat: usize) -> Self {
        self.repeat = repeat;
        self
    }

    /// Send `op` to each target, once per round.
    ///
    /// Per-target failures are collected in the returned report after every
    /// target was attempted. Encoding errors, socket setup errors and, under
    /// [`AddressPolicy::FailFast`], a malformed address end the dispatch.
    pub async fn dispatch(&self, targets: &[Device], op: &Operation) -> Result<SendReport> {
        let message = Message::encode(op)?;
        debug!("dispatching {message} to {} targets", targets.len());

        let mut report = SendReport::default();
        for round in 0..=self.repeat {
            let sent = self
                .transport
                .send_unicast(targets, &message, self.policy)
                .await?;
            if !sent.is_success() {
                warn!(
                    "round {round}: {} of {} sends failed",
                    sent.failures().len(),
                    sent.attempted()
                );
            }
            report.merge(sent);
        }
        Ok(report)
    }

    /// Broadcast `op` to the whole subnet, once per round.
    pub async fn broadcast(&self, op: &Operation) -> Result<()> {
        let message = Message::encode(op)?;
        for _ in 0..=self.repeat {
            self.transport.send_broadcast(&message).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;
    use std::time::Duration;

    use super::*;
    use crate::operation::Modifiers;
    use crate::transport::TransportConfig;
    use crate::types::{Color, Dimming};

    async fn receiver() -> (tokio::net::UdpSocket, Dispatcher) {
        let socket = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let transport = Transport::new(TransportConfig {
            port: socket.local_addr().unwrap().port(),
            bind_addr: Ipv4Addr::LOCALHOST,
            broadcast_addr: Ipv4Addr::LOCALHOST,
        });
        (socket, Dispatcher::new(transport))
    }

    async fn count(socket: &tokio::net::UdpSocket, expected: &[u8]) -> usize {
        let mut n = 0;
        let mut buf = [0u8; 1024];
        while let Ok(Ok(len)) =
            tokio::time::timeout(Duration::from_millis(300), socket.recv(&mut buf)).await
        {
            assert_eq!(&buf[..len], expected);
            n += 1;
        }
        n
    }

    #[tokio::test]
    async fn test_repeat_sends_every_round() {
        let (socket, dispatcher) = receiver().await;
        let dispatcher = dispatcher.repeat(2);
        let op = Operation::SetColor(
            Color::rgb(255, 0, 0),
            Modifiers {
                dimming: Dimming::create(50),
                speed: None,
            },
        );
        let targets = vec![Device::from_ip("127.0.0.1"); 2];

        let report = dispatcher.dispatch(&targets, &op).await.unwrap();

        assert_eq!(report.sent(), 6);
        assert_eq!(
            count(
                &socket,
                br#"{"id":1,"method":"setPilot","params":{"r":255,"g":0,"b":0,"dimming":50}}"#
            )
            .await,
            6
        );
    }

    #[tokio::test]
    async fn test_partial_failure_after_all_targets() {
        let (socket, dispatcher) = receiver().await;
        let targets = vec![
            Device::from_ip("127.0.0.1"),
            Device::from_ip("300.1.1.1"),
            Device::from_ip("127.0.0.1"),
        ];

        let report = dispatcher
            .dispatch(&targets, &Operation::PowerOn)
            .await
            .unwrap();

        let expected = Message::encode(&Operation::PowerOn).unwrap();
        assert_eq!(count(&socket, expected.as_bytes()).await, 2);
        assert!(matches!(
            report.into_result(),
            Err(Error::PartialFailure {
                failed: 1,
                attempted: 3
            })
        ));
    }

    #[tokio::test]
    async fn test_fail_fast_policy() {
        let (socket, dispatcher) = receiver().await;
        let dispatcher = dispatcher.policy(AddressPolicy::FailFast).repeat(1);
        let targets = vec![
            Device::from_ip("127.0.0.1"),
            Device::from_ip("300.1.1.1"),
            Device::from_ip("127.0.0.1"),
        ];

        let err = dispatcher
            .dispatch(&targets, &Operation::PowerOn)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Address { .. }));
        // the first round stops at the bad address; no second round
        let expected = Message::encode(&Operation::PowerOn).unwrap();
        assert_eq!(count(&socket, expected.as_bytes()).await, 1);
    }

    #[tokio::test]
    async fn test_broadcast_rounds() {
        let (socket, dispatcher) = receiver().await;
        let dispatcher = dispatcher.repeat(1);

        dispatcher.broadcast(&Operation::PowerOff).await.unwrap();

        let expected = Message::encode(&Operation::PowerOff).unwrap();
        assert_eq!(count(&socket, expected.as_bytes()).await, 2);
    }
}
