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

//! Conversion from a delta document to HTML.
//!
//! [`render`] is a total left fold over the operation sequence: one HTML
//! fragment per operation, concatenated in input order with no reordering
//! or merging of adjacent runs. Unknown operations contribute nothing.
//!
//! ## A note on escaping
//!
//! Text and math bodies are emitted **verbatim** — markup-significant
//! characters in text content will be interpreted as markup by the display
//! surface. This preserves the widget's established content contract and is
//! security-relevant: callers must not feed untrusted documents to
//! [`render`] and display the result in a privileged context. Attribute
//! values (`src`, `alt`, `style`) are double-quote escaped.

use delta_doc::{AttributeSet, DeltaDocument, OpPayload};
use html_escape::encode_double_quoted_attribute;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Style keys in emission order. The declaration order here is the
/// property order of the rendered style fragment.
#[derive(Clone, Copy, Debug, EnumIter)]
enum StyleKey {
    Bold,
    Color,
    Italic,
    Underline,
    Width,
    Height,
}

impl StyleKey {
    /// The CSS `property: value` pair this key contributes, if the
    /// attribute is present.
    fn css<'a>(self, attributes: &'a AttributeSet) -> Option<(&'static str, &'a str)> {
        match self {
            Self::Bold => attributes.bold.then_some(("font-weight", "bold")),
            Self::Color => {
                attributes.color.as_deref().map(|c| ("color", c))
            }
            Self::Italic => {
                attributes.italic.then_some(("font-style", "italic"))
            }
            Self::Underline => attributes
                .underline
                .then_some(("text-decoration", "underline")),
            Self::Width => attributes.width.as_deref().map(|w| ("width", w)),
            Self::Height => {
                attributes.height.as_deref().map(|h| ("height", h))
            }
        }
    }
}

/// Build the inline style fragment for an attribute set.
///
/// One `property: value;` per present key, concatenated with no separator,
/// in the fixed order bold, color, italic, underline, width, height.
pub fn style_fragment(attributes: &AttributeSet) -> String {
    let mut css = String::new();
    for key in StyleKey::iter() {
        if let Some((property, value)) = key.css(attributes) {
            css.push_str(&format!("{property}: {value};"));
        }
    }
    css
}

/// Render a delta document to an HTML string.
///
/// Total over any well-formed document: unknown operations are skipped
/// with a debug log line, never an error, and an empty document yields an
/// empty string.
pub fn render(document: &DeltaDocument) -> String {
    let mut html = String::new();

    for op in &document.ops {
        let style = encode_double_quoted_attribute(&style_fragment(&op.attributes))
            .into_owned();
        match &op.payload {
            OpPayload::Text { text } => {
                html.push_str(&format!(
                    "<span style=\"{style}\">{text}</span>"
                ));
            }
            OpPayload::Math { expression } => {
                html.push_str(&format!(
                    "<math-field contenteditable=\"false\" mode=\"text\" \
                     style=\"{style}\">{expression}</math-field>"
                ));
            }
            OpPayload::Image { src, image_id } => {
                html.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\" style=\"{style}\">",
                    encode_double_quoted_attribute(src),
                    encode_double_quoted_attribute(image_id),
                ));
            }
            OpPayload::Unknown => {
                tracing::debug!("ignoring unrecognized operation in render");
            }
        }
    }

    html
}
