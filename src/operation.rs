//! Requested lighting operations.

use crate::errors::Error;
use crate::types::{Color, Dimming, Kelvin, Scene, Speed};

/// Every selector a caller may set, before one operation is chosen.
///
/// Several selectors can be set at once; [`Operation::from_request`] decides
/// which one wins.
///
/// # Examples
///
/// ```
/// use wizctl::{Color, LightRequest, Operation};
///
/// let mut request = LightRequest::new();
/// request.off();
/// request.color(Color::rgb(0, 0, 255));
///
/// // color outranks an explicit off
/// assert!(matches!(Operation::from_request(&request), Operation::SetColor(..)));
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct LightRequest {
    pub(crate) color: Option<Color>,
    pub(crate) kelvin: Option<Kelvin>,
    pub(crate) scene: Option<Scene>,
    pub(crate) off: bool,
    pub(crate) on: bool,
    pub(crate) dimming: Option<Dimming>,
    pub(crate) speed: Option<Speed>,
}

impl LightRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&mut self, color: Color) {
        self.color = Some(color);
    }

    pub fn kelvin(&mut self, kelvin: Kelvin) {
        self.kelvin = Some(kelvin);
    }

    pub fn scene(&mut self, scene: Scene) {
        self.scene = Some(scene);
    }

    /// Select a scene by name.
    ///
    /// A name that is given but unknown is an error, not "no scene".
    ///
    /// # Examples
    ///
    /// ```
    /// use wizctl::{LightRequest, Scene};
    ///
    /// let mut request = LightRequest::new();
    /// assert!(request.scene_name("ocean").is_ok());
    /// assert!(request.scene_name("disco").is_err());
    /// ```
    pub fn scene_name(&mut self, name: &str) -> Result<(), Error> {
        let scene = name
            .parse::<Scene>()
            .map_err(|_| Error::BadScene(name.to_string()))?;
        self.scene(scene);
        Ok(())
    }

    pub fn off(&mut self) {
        self.off = true;
    }

    pub fn on(&mut self) {
        self.on = true;
    }

    pub fn dimming(&mut self, dimming: Dimming) {
        self.dimming = Some(dimming);
    }

    pub fn speed(&mut self, speed: Speed) {
        self.speed = Some(speed);
    }
}

/// Optional brightness and speed attached to a pilot operation.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modifiers {
    pub dimming: Option<Dimming>,
    pub speed: Option<Speed>,
}

/// The single operation sent to every target of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    PowerOn,
    PowerOff,
    SetColor(Color, Modifiers),
    SetTemperature(Kelvin, Modifiers),
    SetScene(Scene, Modifiers),
}

impl Operation {
    /// Pick one operation from a request.
    ///
    /// Priority is color, then temperature, then scene, then an explicit off,
    /// then an explicit on. With nothing selected the light is turned on.
    /// Modifiers only survive on the pilot operations.
    pub fn from_request(request: &LightRequest) -> Self {
        let modifiers = Modifiers {
            dimming: request.dimming,
            speed: request.speed,
        };

        if let Some(color) = request.color {
            Operation::SetColor(color, modifiers)
        } else if let Some(kelvin) = request.kelvin {
            Operation::SetTemperature(kelvin, modifiers)
        } else if let Some(scene) = request.scene {
            Operation::SetScene(scene, modifiers)
        } else if request.off {
            Operation::PowerOff
        } else {
            Operation::PowerOn
        }
    }

    pub fn modifiers(&self) -> Option<&Modifiers> {
        match self {
            Operation::PowerOn | Operation::PowerOff => None,
            Operation::SetColor(_, m)
            | Operation::SetTemperature(_, m)
            | Operation::SetScene(_, m) => Some(m),
        }
    }
}

impl From<&LightRequest> for Operation {
    fn from(request: &LightRequest) -> Self {
        Operation::from_request(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn everything() -> LightRequest {
        let mut request = LightRequest::new();
        request.color(Color::rgb(1, 2, 3));
        request.kelvin(Kelvin::clamped(3000));
        request.scene(Scene::Ocean);
        request.off();
        request.on();
        request.dimming(Dimming::clamped(40));
        request
    }

    #[test]
    fn test_priority_order() {
        let mut request = everything();
        let modifiers = Modifiers {
            dimming: Dimming::create(40),
            speed: None,
        };
        assert_eq!(
            Operation::from_request(&request),
            Operation::SetColor(Color::rgb(1, 2, 3), modifiers)
        );

        request.color = None;
        assert_eq!(
            Operation::from_request(&request),
            Operation::SetTemperature(Kelvin::clamped(3000), modifiers)
        );

        request.kelvin = None;
        assert_eq!(
            Operation::from_request(&request),
            Operation::SetScene(Scene::Ocean, modifiers)
        );

        request.scene = None;
        assert_eq!(Operation::from_request(&request), Operation::PowerOff);

        request.off = false;
        assert_eq!(Operation::from_request(&request), Operation::PowerOn);

        request.on = false;
        assert_eq!(Operation::from_request(&request), Operation::PowerOn);
    }

    #[test]
    fn test_power_ignores_modifiers() {
        let mut request = LightRequest::new();
        request.on();
        request.dimming(Dimming::clamped(10));
        request.speed(Speed::clamped(50));
        let op = Operation::from(&request);
        assert_eq!(op, Operation::PowerOn);
        assert!(op.modifiers().is_none());
    }

    #[test]
    fn test_bad_scene_name_leaves_request_untouched() {
        let mut request = LightRequest::new();
        let err = request.scene_name("nonexistent").unwrap_err();
        assert_eq!(err, Error::BadScene("nonexistent".into()));
        assert_eq!(request, LightRequest::new());
    }
}
