//! # wizctl
//!
//! Control WiZ smart bulbs on the local network with one-shot UDP commands.
//!
//! Targets come from a device directory (a `name,ip[,room]` text file),
//! from an explicit address list, or from the whole subnet via broadcast.
//! One [`Operation`] is encoded once and sent to every target, with a single
//! attempt per device.
//!
//! ## Quick Start
//!
//! ```ignore
//! use wizctl::{directory, Color, Dispatcher, LightRequest, Operation, Transport};
//!
//! async fn evening() -> Result<(), wizctl::Error> {
//!     let devices = directory::parse(b"Desk,192.168.1.20,Office\n", None, Some("Office"))?;
//!
//!     let mut request = LightRequest::new();
//!     request.color(Color::rgb(255, 120, 0));
//!
//!     Dispatcher::new(Transport::default())
//!         .dispatch(&devices, &Operation::from_request(&request))
//!         .await?
//!         .into_result()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Components
//!
//! - **Filtering**: [`matches`] tests a name or room against a comma-separated allow-list
//! - **Directory**: [`directory::parse`] reads records in file order, applying the filters
//! - **Operations**: [`Operation::from_request`] picks exactly one operation by priority
//! - **Encoding**: [`Message::encode`] produces the wire JSON
//! - **Transport**: [`Transport`] sends unicast, broadcast, and runs [`Transport::discover_bulbs`]
//! - **Dispatch**: [`Dispatcher`] fans a message out and aggregates per-target failures
//!
//! ## Communication
//!
//! Bulbs listen on UDP port 38899 and accept one JSON object per datagram.
//! There is no authentication and no acknowledgement is awaited.
//!
//! ## Feature Flags
//!
//! - `runtime-tokio` (default): Use the tokio async runtime
//! - `runtime-async-std`: Use the async-std runtime
//! - `runtime-smol`: Use the smol runtime (through `async-io`)
//! - `cli` (default): Build the `wiz` command-line tool

pub mod directory;
mod device;
mod discovery;
mod dispatch;
mod errors;
mod filter;
mod message;
mod operation;
pub mod runtime;
mod transport;
mod types;

// Re-export public API
pub use device::Device;
pub use directory::MAX_DEVICES;
pub use discovery::{DiscoveryOptions, DiscoveryReply};
pub use dispatch::Dispatcher;
pub use errors::Error;
pub use filter::matches;
pub use message::Message;
pub use operation::{LightRequest, Modifiers, Operation};
pub use transport::{AddressPolicy, PORT, SendReport, Transport, TransportConfig};
pub use types::{BAD_SCENE, Color, Dimming, Kelvin, Scene, Speed, scene_id};
