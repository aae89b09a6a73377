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

//! Content values exchanged with the host application.

use delta_doc::DeltaDocument;
use unicode_segmentation::UnicodeSegmentation;

/// Content handed to the bridge to seed (or replace) the widget's document.
///
/// `Html` envelopes are injected as **trusted** markup — they bypass the
/// widget's sanitization. That is a deliberate trust boundary: the caller
/// must ensure the markup is safe.
#[derive(Clone, Debug, PartialEq)]
pub enum ContentEnvelope {
    /// Raw markup, injected verbatim.
    Html(String),
    /// A structured delta document, set as the widget's document.
    Delta(DeltaDocument),
}

/// The three-projection snapshot delivered on every throttled change and
/// retrievable on demand.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentSnapshot {
    /// The structured document, as the widget reports it.
    pub delta: DeltaDocument,
    /// The plain-text projection.
    pub plain_text: String,
    /// The widget's rendered markup.
    pub html: String,
}

impl ContentSnapshot {
    /// Grapheme-cluster count of the plain-text projection, for display
    /// against a configured character limit.
    pub fn grapheme_count(&self) -> usize {
        self.plain_text.graphemes(true).count()
    }
}
