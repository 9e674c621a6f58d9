//! smol backend, built on `async-io`.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use async_io::{Async, Timer};
use futures::future::{self, Either};

use super::{AsyncUdpSocket, TimedOut};

pub struct UdpSocket(Async<std::net::UdpSocket>);

impl AsyncUdpSocket for UdpSocket {
    async fn bind(addr: SocketAddr) -> io::Result<Self> {
        Async::<std::net::UdpSocket>::bind(addr).map(UdpSocket)
    }

    async fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize> {
        self.0.send_to(buf, target).await
    }

    async fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        self.0.recv_from(buf).await
    }

    fn set_broadcast(&self, broadcast: bool) -> io::Result<()> {
        self.0.get_ref().set_broadcast(broadcast)
    }
}

pub(super) async fn timeout_impl<F, T>(duration: Duration, fut: F) -> Result<T, TimedOut>
where
    F: Future<Output = T>,
{
    let timer = Timer::after(duration);

    futures::pin_mut!(fut);
    futures::pin_mut!(timer);

    match future::select(fut, timer).await {
        Either::Left((result, _)) => Ok(result),
        Either::Right(_) => Err(TimedOut),
    }
}
