//! Renderer settings.
//!
//! Settings arrive as JSON from the host application. Layout options are an
//! open name → value map (`layout.additionalSettings`) that the layout engine
//! queries with typed defaults; the engine never writes to it.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LayoutError, Result};

/// Option names understood by the page layout.
pub mod options {
    pub const START: &str = "start";
    pub const COUNT: &str = "count";
    pub const AUTO_SIZE: &str = "autoSize";
    pub const BARS_PER_ROW: &str = "barsPerRow";
    pub const HIDE_INFO: &str = "hideInfo";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Uniform zoom applied to every size constant. Must be > 0.
    pub scale: f64,
    /// Page width used when `autoSize` is off. Values <= 0 mean "unset".
    pub width: f64,
    /// Indices into `Score::tracks` of the tracks to render.
    pub tracks: Vec<usize>,
    pub layout: LayoutSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSettings {
    /// Layout mode name. Only "page" is provided by this crate.
    pub mode: String,
    pub additional_settings: HashMap<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            width: -1.0,
            tracks: vec![0],
            layout: LayoutSettings::default(),
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            mode: "page".to_string(),
            additional_settings: HashMap::new(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(LayoutError::InvalidScale(self.scale));
        }
        Ok(())
    }

    /// Builder helper: set a layout option.
    pub fn with_option(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.layout.set(name, value);
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_tracks(mut self, tracks: Vec<usize>) -> Self {
        self.tracks = tracks;
        self
    }
}

impl LayoutSettings {
    /// Look up an option, falling back to `default` when it is absent or
    /// cannot be read as `T`.
    pub fn get<T: DeserializeOwned>(&self, name: &str, default: T) -> T {
        match self.additional_settings.get(name) {
            None | Some(Value::Null) => default,
            Some(value) => match T::deserialize(value) {
                Ok(v) => v,
                Err(e) => {
                    log::warn!("layout option '{name}' has unexpected value {value}: {e}; using default");
                    default
                }
            },
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.additional_settings.insert(name.to_string(), value.into());
    }
}
