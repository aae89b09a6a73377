// Copyright 2026 The Matrix.org Foundation C.I.C.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Style attributes attached to a delta operation.

use serde_json::{Map, Value};

/// The style attributes an operation may carry.
///
/// Absence of a key means "inherit/default". The widget emits attributes as
/// loose JSON; [`AttributeSet::from_value`] applies the widget's truthiness
/// rules to the flag keys and string-coerces the value keys. Non-primitive
/// values degrade to their compact JSON encoding rather than failing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeSet {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl AttributeSet {
    /// Build an attribute set from the widget's JSON `attributes` value.
    ///
    /// Anything that is not a JSON object yields the default (empty) set.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        Self {
            bold: map.get("bold").is_some_and(is_truthy),
            italic: map.get("italic").is_some_and(is_truthy),
            underline: map.get("underline").is_some_and(is_truthy),
            color: coerced(map, "color"),
            width: coerced(map, "width"),
            height: coerced(map, "height"),
        }
    }

    /// Whether no attribute is present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Serialize back to the widget's JSON form, omitting absent keys.
    /// Returns `None` when the set is empty.
    pub(crate) fn to_value(&self) -> Option<Value> {
        let mut map = Map::new();
        if self.bold {
            map.insert("bold".into(), Value::Bool(true));
        }
        if self.italic {
            map.insert("italic".into(), Value::Bool(true));
        }
        if self.underline {
            map.insert("underline".into(), Value::Bool(true));
        }
        for (key, value) in [
            ("color", &self.color),
            ("width", &self.width),
            ("height", &self.height),
        ] {
            if let Some(value) = value {
                map.insert(key.into(), Value::String(value.clone()));
            }
        }
        if map.is_empty() {
            None
        } else {
            Some(Value::Object(map))
        }
    }
}

/// Widget-side truthiness: `null`, `false`, `0` and `""` are absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerce a present, truthy value key to a string.
///
/// Strings pass through; every other value falls back to its compact JSON
/// encoding (`Value`'s `Display`), which is what ends up in the rendered
/// style fragment for malformed input.
fn coerced(map: &Map<String, Value>, key: &str) -> Option<String> {
    let value = map.get(key).filter(|v| is_truthy(v))?;
    Some(match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
