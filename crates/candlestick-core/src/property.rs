// File: crates/candlestick-core/src/property.rs
// Summary: Host property bag (settings objects nested by object name) with typed lookups.

use serde_json::{Map, Value};

use crate::error::{ChartError, Result};
use crate::types::Color;

/// Settings as the host persists them: `{ objectName: { propertyName: value } }`.
///
/// Lookups are typed and forgiving. A value of the wrong JSON type reads as
/// absent, so callers fall back to their default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyBag {
    objects: Map<String, Value>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(objects) => Ok(Self { objects }),
            Value::Null => Ok(Self::default()),
            Value::Array(_) => Err(ChartError::SettingsShape("array")),
            Value::String(_) => Err(ChartError::SettingsShape("string")),
            Value::Number(_) => Err(ChartError::SettingsShape("number")),
            Value::Bool(_) => Err(ChartError::SettingsShape("bool")),
        }
    }

    /// Set one property, creating the object if needed.
    pub fn set(&mut self, object: &str, property: &str, value: Value) -> &mut Self {
        let entry = self
            .objects
            .entry(object.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(props) = entry {
            props.insert(property.to_string(), value);
        }
        self
    }

    pub fn get(&self, object: &str, property: &str) -> Option<&Value> {
        self.objects.get(object)?.as_object()?.get(property)
    }

    pub fn get_bool(&self, object: &str, property: &str) -> Option<bool> {
        self.get(object, property)?.as_bool()
    }

    pub fn get_f64(&self, object: &str, property: &str) -> Option<f64> {
        self.get(object, property)?.as_f64().filter(|v| v.is_finite())
    }

    pub fn get_str(&self, object: &str, property: &str) -> Option<&str> {
        self.get(object, property)?.as_str()
    }

    /// Read a fill in the host's `{"solid": {"color": "#rrggbb"}}` shape.
    /// A bare color string is accepted too.
    pub fn get_fill(&self, object: &str, property: &str) -> Option<Color> {
        let value = self.get(object, property)?;
        let color = match value {
            Value::String(s) => s.as_str(),
            Value::Object(_) => value.get("solid")?.get("color")?.as_str()?,
            _ => return None,
        };
        Color::from_hex(color)
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// The host's fill shape for a resolved color.
pub fn fill_value(color: Color) -> Value {
    serde_json::json!({ "solid": { "color": color.to_hex() } })
}
