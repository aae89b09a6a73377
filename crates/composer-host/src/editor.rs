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

//! The narrow contract to the embedded editor widget.
//!
//! The widget is an external collaborator: everything it owns — the
//! document, editing commands, the math-input keyboard, rendering — stays
//! behind [`EditorCollaborator`]. Platform layers implement the trait
//! against the real widget; tests implement it with scripted fakes.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use delta_doc::DeltaDocument;

use crate::upload::ImageUploadAdapter;

/// Process-wide counter backing [`next_mount_id`].
static MOUNT_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A unique mount identifier for one widget instance.
pub fn next_mount_id() -> String {
    let n = MOUNT_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("composer-mount-{n}")
}

/// Errors surfaced by a widget implementation.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("editor failed to initialize: {0}")]
    Init(String),

    #[error("editor rejected content: {0}")]
    Content(String),
}

/// Character-count limit configuration, passed through to the widget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharLimit {
    pub enabled: bool,
    pub max: usize,
}

impl Default for CharLimit {
    fn default() -> Self {
        Self {
            enabled: false,
            max: 10_000,
        }
    }
}

/// Module configuration passed through to the widget at construction.
///
/// Serializes to the camelCase JSON the widget boundary expects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorOptions {
    /// Toolbar item names, in display order. Item handlers live with the
    /// widget; only the layout crosses the boundary.
    pub toolbar: Vec<String>,
    /// Whether the math-input module is enabled.
    pub math_input: bool,
    /// Character-count limit and its enable flag.
    pub char_limit: CharLimit,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            toolbar: vec![
                "bold".into(),
                "italic".into(),
                "underline".into(),
                "color".into(),
                "image".into(),
                "formula".into(),
            ],
            math_input: true,
            char_limit: CharLimit::default(),
        }
    }
}

/// A change-notification signal shared between the bridge and the widget.
///
/// The widget calls [`notify`](Self::notify) on every document change; the
/// bridge drains the count on its next tick. Counting rather than flagging
/// lets the bridge log how many notifications a throttle window coalesced.
#[derive(Clone, Debug, Default)]
pub struct ChangeSignal(Rc<Cell<u64>>);

impl ChangeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one change notification.
    pub fn notify(&self) {
        self.0.set(self.0.get().saturating_add(1));
    }

    /// Drain and return the notifications recorded since the last call.
    pub(crate) fn take(&self) -> u64 {
        self.0.replace(0)
    }
}

/// The operations the bridge needs from a live widget instance.
///
/// This is deliberately narrow: construct (via [`EditorFactory`]), wait for
/// readiness, load content, query content projections, and subscribe to
/// change notifications. Nothing else of the widget's surface crosses this
/// boundary.
pub trait EditorCollaborator {
    /// Block until the widget has mounted and its internal rendering has
    /// settled. The bridge awaits this before pushing any content.
    fn wait_ready(&mut self) -> Result<(), EditorError>;

    /// Replace the widget's document with a delta document.
    fn set_delta(&mut self, document: &DeltaDocument) -> Result<(), EditorError>;

    /// Inject raw markup as trusted content, bypassing sanitization.
    fn paste_html(&mut self, html: &str) -> Result<(), EditorError>;

    /// A fresh snapshot of the structured document.
    fn delta(&self) -> DeltaDocument;

    /// The plain-text projection of the current document.
    fn plain_text(&self) -> String;

    /// The widget's rendered markup for the current document.
    fn html(&self) -> String;

    /// Register the change signal. The bridge calls this exactly once per
    /// widget instance.
    fn subscribe(&mut self, signal: ChangeSignal);
}

/// Constructs widget instances bound to a mount identifier.
pub trait EditorFactory {
    fn create(
        &self,
        mount_id: &str,
        options: &EditorOptions,
        upload: ImageUploadAdapter,
    ) -> Result<Box<dyn EditorCollaborator>, EditorError>;
}
