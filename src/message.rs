//! Wire encoding of operations.
//!
//! Every command is one compact JSON object per datagram:
//!
//! ```text
//! {"id":1,"method":"setState","params":{"state":true}}
//! {"id":1,"method":"setPilot","params":{"r":255,"g":0,"b":0,"dimming":50,"speed":100}}
//! ```
//!
//! Inside `params` the selector comes first, then `dimming`, then `speed`.
//! Some firmware reads these positionally, so the order is part of the
//! format, fixed by the field order of the params struct.

use std::fmt;

use serde::Serialize;

use crate::errors::Error;
use crate::operation::{Modifiers, Operation};

type Result<T> = std::result::Result<T, Error>;

const COMMAND_ID: i64 = 1;
const DISCOVERY_ID: i64 = i32::MIN as i64;

#[serde_with::skip_serializing_none]
#[derive(Serialize)]
struct Envelope {
    id: i64,
    method: &'static str,
    params: Option<Params>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Params {
    State { state: bool },
    Pilot(Pilot),
}

#[serde_with::skip_serializing_none]
#[derive(Default, Serialize)]
struct Pilot {
    r: Option<u8>,
    g: Option<u8>,
    b: Option<u8>,
    temp: Option<u16>,
    #[serde(rename = "sceneId")]
    scene: Option<u16>,
    dimming: Option<u8>,
    speed: Option<u8>,
}

impl Pilot {
    fn with(mut self, modifiers: &Modifiers) -> Self {
        self.dimming = modifiers.dimming.map(|d| d.percent());
        self.speed = modifiers.speed.map(|s| s.value());
        self
    }
}

impl From<&Operation> for Envelope {
    fn from(op: &Operation) -> Self {
        let params = match op {
            Operation::PowerOn => Params::State { state: true },
            Operation::PowerOff => Params::State { state: false },
            Operation::SetColor(color, modifiers) => Params::Pilot(
                Pilot {
                    r: Some(color.red),
                    g: Some(color.green),
                    b: Some(color.blue),
                    ..Pilot::default()
                }
                .with(modifiers),
            ),
            Operation::SetTemperature(kelvin, modifiers) => Params::Pilot(
                Pilot {
                    temp: Some(kelvin.kelvin),
                    ..Pilot::default()
                }
                .with(modifiers),
            ),
            Operation::SetScene(scene, modifiers) => Params::Pilot(
                Pilot {
                    scene: Some(scene.id()),
                    ..Pilot::default()
                }
                .with(modifiers),
            ),
        };

        let method = match params {
            Params::State { .. } => "setState",
            Params::Pilot(_) => "setPilot",
        };

        Envelope {
            id: COMMAND_ID,
            method,
            params: Some(params),
        }
    }
}

/// An encoded datagram, built once and sent to every target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    bytes: Vec<u8>,
}

impl Message {
    /// Encode an operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use wizctl::{Message, Operation};
    ///
    /// let msg = Message::encode(&Operation::PowerOff).unwrap();
    /// assert_eq!(msg.as_bytes(), br#"{"id":1,"method":"setState","params":{"state":false}}"#);
    /// ```
    pub fn encode(op: &Operation) -> Result<Self> {
        Self::from_envelope(&Envelope::from(op))
    }

    /// The broadcast query that asks every bulb to identify itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use wizctl::Message;
    ///
    /// let msg = Message::discovery().unwrap();
    /// assert_eq!(msg.to_string(), r#"{"id":-2147483648,"method":"getDevInfo"}"#);
    /// ```
    pub fn discovery() -> Result<Self> {
        Self::from_envelope(&Envelope {
            id: DISCOVERY_ID,
            method: "getDevInfo",
            params: None,
        })
    }

    fn from_envelope(envelope: &Envelope) -> Result<Self> {
        let bytes = serde_json::to_vec(envelope).map_err(Error::JsonDump)?;
        Ok(Message { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::LightRequest;
    use crate::types::{Color, Dimming, Kelvin, Scene, Speed};

    fn encoded(op: Operation) -> String {
        Message::encode(&op).unwrap().to_string()
    }

    fn modifiers(dimming: Option<u8>, speed: Option<u8>) -> Modifiers {
        Modifiers {
            dimming: dimming.and_then(Dimming::create),
            speed: speed.and_then(Speed::create),
        }
    }

    #[test]
    fn test_power() {
        assert_eq!(
            encoded(Operation::PowerOn),
            r#"{"id":1,"method":"setState","params":{"state":true}}"#
        );
        assert_eq!(
            encoded(Operation::PowerOff),
            r#"{"id":1,"method":"setState","params":{"state":false}}"#
        );
    }

    #[test]
    fn test_color() {
        assert_eq!(
            encoded(Operation::SetColor(Color::rgb(255, 128, 0), Modifiers::default())),
            r#"{"id":1,"method":"setPilot","params":{"r":255,"g":128,"b":0}}"#
        );
    }

    #[test]
    fn test_temperature_with_dimming() {
        assert_eq!(
            encoded(Operation::SetTemperature(
                Kelvin::clamped(2700),
                modifiers(Some(50), None)
            )),
            r#"{"id":1,"method":"setPilot","params":{"temp":2700,"dimming":50}}"#
        );
    }

    #[test]
    fn test_scene_with_both_modifiers() {
        assert_eq!(
            encoded(Operation::SetScene(Scene::Sunset, modifiers(Some(0), Some(120)))),
            r#"{"id":1,"method":"setPilot","params":{"sceneId":3,"dimming":0,"speed":120}}"#
        );
    }

    #[test]
    fn test_speed_without_dimming() {
        assert_eq!(
            encoded(Operation::SetScene(Scene::Party, modifiers(None, Some(10)))),
            r#"{"id":1,"method":"setPilot","params":{"sceneId":4,"speed":10}}"#
        );
    }

    #[test]
    fn test_on_ignores_modifiers_from_request() {
        let mut request = LightRequest::new();
        request.dimming(Dimming::clamped(80));
        request.speed(Speed::clamped(150));
        request.on();
        assert_eq!(
            encoded(Operation::from_request(&request)),
            r#"{"id":1,"method":"setState","params":{"state":true}}"#
        );
    }

    #[test]
    fn test_single_selector_by_priority() {
        let mut request = LightRequest::new();
        request.scene(Scene::Ocean);
        request.kelvin(Kelvin::clamped(5000));
        request.color(Color::rgb(0, 0, 255));
        request.dimming(Dimming::clamped(50));

        let json: serde_json::Value =
            serde_json::from_slice(Message::encode(&Operation::from(&request)).unwrap().as_bytes())
                .unwrap();
        let params = json["params"].as_object().unwrap();
        assert!(params.contains_key("r"));
        assert!(!params.contains_key("temp"));
        assert!(!params.contains_key("sceneId"));
        assert_eq!(params["dimming"], 50);
    }

    #[test]
    fn test_deterministic() {
        let op = Operation::SetColor(Color::rgb(9, 8, 7), modifiers(Some(33), Some(44)));
        assert_eq!(Message::encode(&op).unwrap(), Message::encode(&op).unwrap());
    }
}
