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

//! The delta document: an ordered sequence of tagged insertion operations.

use serde_json::{json, Map, Value};

use crate::{AttributeSet, DeltaParseError};

/// An ordered snapshot of the widget's document.
///
/// Order is significant and represents document order. A document is
/// immutable once produced; a fresh snapshot is requested from the widget
/// on demand rather than mutated in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeltaDocument {
    pub ops: Vec<DeltaOp>,
}

/// One insertion operation: a payload plus optional style attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct DeltaOp {
    pub payload: OpPayload,
    pub attributes: AttributeSet,
}

/// The payload of an operation, discriminated once at ingestion.
///
/// Payload shapes the ingester does not recognize become [`Unknown`] so
/// that document order and length are preserved; consumers skip them
/// rather than treating them as errors.
///
/// [`Unknown`]: OpPayload::Unknown
#[derive(Clone, Debug, PartialEq)]
pub enum OpPayload {
    Text { text: String },
    Image { src: String, image_id: String },
    Math { expression: String },
    Unknown,
}

impl DeltaOp {
    /// A plain-text insertion with no attributes.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            payload: OpPayload::Text { text: text.into() },
            attributes: AttributeSet::default(),
        }
    }

    /// Attach an attribute set to this operation.
    pub fn with_attributes(mut self, attributes: AttributeSet) -> Self {
        self.attributes = attributes;
        self
    }
}

impl DeltaDocument {
    /// A document built from the given operations, in order.
    pub fn from_ops(ops: Vec<DeltaOp>) -> Self {
        Self { ops }
    }

    /// Parse a document from the widget's JSON text form.
    pub fn from_json(json: &str) -> Result<Self, DeltaParseError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Parse a document from the widget's JSON value form.
    ///
    /// Accepts either `{"ops": [...]}` or a bare operation array. Anything
    /// else at the top level is a [`DeltaParseError::NotADocument`].
    /// Individual operations never fail: unrecognized shapes are tagged
    /// [`OpPayload::Unknown`] and logged.
    pub fn from_value(value: &Value) -> Result<Self, DeltaParseError> {
        let ops = match value {
            Value::Array(ops) => ops,
            Value::Object(map) => match map.get("ops") {
                Some(Value::Array(ops)) => ops,
                _ => return Err(DeltaParseError::NotADocument),
            },
            _ => return Err(DeltaParseError::NotADocument),
        };

        Ok(Self {
            ops: ops.iter().map(ingest_op).collect(),
        })
    }

    /// Serialize to the widget's `{"ops": [...]}` form.
    ///
    /// [`OpPayload::Unknown`] operations have no payload to serialize and
    /// are omitted.
    pub fn to_value(&self) -> Value {
        let ops: Vec<Value> = self.ops.iter().filter_map(op_to_value).collect();
        json!({ "ops": ops })
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// The plain-text projection: text payloads verbatim, in order.
    /// Image and math insertions contribute nothing.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for op in &self.ops {
            if let OpPayload::Text { text } = &op.payload {
                out.push_str(text);
            }
        }
        out
    }
}

/// Discriminate a single raw operation value into a [`DeltaOp`].
fn ingest_op(value: &Value) -> DeltaOp {
    let attributes = value
        .get("attributes")
        .map(AttributeSet::from_value)
        .unwrap_or_default();

    let payload = match value.get("insert") {
        Some(Value::String(text)) => OpPayload::Text { text: text.clone() },
        Some(Value::Object(embed)) => ingest_embed(embed),
        _ => {
            // retain/delete ops, bare scalars, and anything else the widget
            // might emit in future document versions
            tracing::debug!("tagging unrecognized operation shape as unknown");
            OpPayload::Unknown
        }
    };

    DeltaOp { payload, attributes }
}

/// Discriminate an object-valued `insert` (an embed) into a payload.
fn ingest_embed(embed: &Map<String, Value>) -> OpPayload {
    if let Some(image) = embed.get("image") {
        return match image {
            // `{"image": {"src": ..., "imageId": ...}}`
            Value::Object(map) => OpPayload::Image {
                src: string_field(map, "src"),
                image_id: string_field(map, "imageId"),
            },
            // `{"image": "https://..."}` — older widget versions emit the
            // source URL directly
            Value::String(src) => OpPayload::Image {
                src: src.clone(),
                image_id: String::new(),
            },
            _ => {
                tracing::debug!("tagging malformed image embed as unknown");
                OpPayload::Unknown
            }
        };
    }

    if let Some(Value::String(expression)) =
        embed.get("formula").or_else(|| embed.get("math"))
    {
        return OpPayload::Math {
            expression: expression.clone(),
        };
    }

    tracing::debug!(
        keys = ?embed.keys().collect::<Vec<_>>(),
        "tagging unrecognized embed as unknown"
    );
    OpPayload::Unknown
}

/// Extract a string field from an embed map, defaulting to empty.
fn string_field(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

/// Serialize one operation back to the widget form, or `None` for
/// [`OpPayload::Unknown`].
fn op_to_value(op: &DeltaOp) -> Option<Value> {
    let insert = match &op.payload {
        OpPayload::Text { text } => Value::String(text.clone()),
        OpPayload::Image { src, image_id } => json!({
            "image": { "src": src, "imageId": image_id }
        }),
        OpPayload::Math { expression } => json!({ "formula": expression }),
        OpPayload::Unknown => return None,
    };

    let mut map = Map::new();
    map.insert("insert".into(), insert);
    if let Some(attributes) = op.attributes.to_value() {
        map.insert("attributes".into(), attributes);
    }
    Some(Value::Object(map))
}
