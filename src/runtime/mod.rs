//! Runtime-agnostic UDP primitives.
//!
//! The transport only needs a handful of datagram operations and a receive
//! deadline. They are expressed here as a trait plus a `timeout` helper, with
//! one implementation per supported async runtime.
//!
//! # Feature Flags
//!
//! Enable exactly one of:
//!
//! - `runtime-tokio` (default)
//! - `runtime-async-std`
//! - `runtime-smol`
//!
//! ```toml
//! [dependencies]
//! wizctl = { version = "0.1", default-features = false, features = ["runtime-smol"] }
//! ```

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

#[cfg(feature = "runtime-tokio")]
mod tokio_impl;

#[cfg(feature = "runtime-async-std")]
mod async_std_impl;

#[cfg(feature = "runtime-smol")]
mod smol_impl;

#[cfg(feature = "runtime-tokio")]
pub use tokio_impl::UdpSocket;

#[cfg(feature = "runtime-async-std")]
pub use async_std_impl::UdpSocket;

#[cfg(feature = "runtime-smol")]
pub use smol_impl::UdpSocket;

#[cfg(feature = "runtime-tokio")]
use tokio_impl::timeout_impl;

#[cfg(feature = "runtime-async-std")]
use async_std_impl::timeout_impl;

#[cfg(feature = "runtime-smol")]
use smol_impl::timeout_impl;

/// Datagram socket operations used by [`crate::Transport`].
///
/// A socket is owned by exactly one transport operation and closed when it is
/// dropped at the end of that operation.
pub trait AsyncUdpSocket: Send + Sync + Sized {
    /// Bind to the given local address.
    fn bind(addr: SocketAddr) -> impl Future<Output = io::Result<Self>> + Send;

    /// Send one datagram to `target`.
    fn send_to(
        &self,
        buf: &[u8],
        target: SocketAddr,
    ) -> impl Future<Output = io::Result<usize>> + Send;

    /// Receive one datagram and the address it came from.
    fn recv_from(
        &self,
        buf: &mut [u8],
    ) -> impl Future<Output = io::Result<(usize, SocketAddr)>> + Send;

    /// Enable or disable `SO_BROADCAST`.
    fn set_broadcast(&self, broadcast: bool) -> io::Result<()>;
}

/// Run a future with a deadline.
///
/// Returns `Err(TimedOut)` if `duration` elapses before the future completes.
pub async fn timeout<F, T>(duration: Duration, future: F) -> Result<T, TimedOut>
where
    F: Future<Output = T>,
{
    timeout_impl(duration, future).await
}

/// Error returned when a deadline expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedOut;

impl std::fmt::Display for TimedOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "operation timed out")
    }
}

impl std::error::Error for TimedOut {}

#[cfg(not(any(
    feature = "runtime-tokio",
    feature = "runtime-async-std",
    feature = "runtime-smol"
)))]
compile_error!(
    "One of \"runtime-tokio\", \"runtime-async-std\", or \"runtime-smol\" features must be enabled"
);

#[cfg(all(feature = "runtime-tokio", feature = "runtime-async-std"))]
compile_error!("Features \"runtime-tokio\" and \"runtime-async-std\" are mutually exclusive");

#[cfg(all(feature = "runtime-tokio", feature = "runtime-smol"))]
compile_error!("Features \"runtime-tokio\" and \"runtime-smol\" are mutually exclusive");

#[cfg(all(feature = "runtime-async-std", feature = "runtime-smol"))]
compile_error!("Features \"runtime-async-std\" and \"runtime-smol\" are mutually exclusive");
