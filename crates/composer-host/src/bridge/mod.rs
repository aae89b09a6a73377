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

//! The content bridge: owns one live widget instance and adapts its
//! change-notification stream to the host's content contract.
//!
//! All work runs on one cooperative event loop. The widget raises change
//! notifications through a [`ChangeSignal`]; the host drives time by
//! calling [`EditorBridge::tick`] (typically once per loop iteration, or
//! when [`EditorBridge::next_deadline`] falls due). Deliveries are
//! throttled with trailing-edge coalescing: at most one
//! [`ContentSnapshot`] per window, snapshotted at delivery time so the
//! last change in the window wins.

mod throttle;

use std::time::{Duration, Instant};

use crate::content::{ContentEnvelope, ContentSnapshot};
use crate::editor::{
    next_mount_id, ChangeSignal, EditorCollaborator, EditorError,
    EditorFactory, EditorOptions,
};
use crate::upload::ImageUploadAdapter;
use throttle::Throttle;

/// Callback invoked with each throttled content delivery.
pub type ChangeListener = Box<dyn FnMut(&ContentSnapshot)>;

/// Owns the lifecycle of one widget instance.
///
/// The instance is created by the bridge, used exclusively by the bridge,
/// and released when the bridge is dropped — it is never shared. No
/// widget-side shutdown call is issued on drop; the widget's own teardown
/// is tied to its mount point.
pub struct EditorBridge {
    editor: Box<dyn EditorCollaborator>,
    mount_id: String,
    signal: ChangeSignal,
    throttle: Throttle,
    value: ContentSnapshot,
    listener: Option<ChangeListener>,
}

impl EditorBridge {
    /// Construct the widget and seed it with the initial content.
    ///
    /// The widget is bound to a freshly generated mount identifier and
    /// receives the caller's options and the image-upload adapter. Seeding
    /// waits for the widget's explicit ready signal; `Html` envelopes are
    /// injected as trusted markup (bypassing sanitization), `Delta`
    /// envelopes are set as the document.
    pub fn new(
        factory: &dyn EditorFactory,
        options: &EditorOptions,
        initial: ContentEnvelope,
        upload: ImageUploadAdapter,
        throttle_window: Duration,
    ) -> Result<Self, EditorError> {
        let mount_id = next_mount_id();
        let mut editor = factory.create(&mount_id, options, upload)?;

        editor.wait_ready()?;
        seed(editor.as_mut(), &initial)?;

        // Subscribe after seeding so the initial load does not count as a
        // user change.
        let signal = ChangeSignal::new();
        editor.subscribe(signal.clone());

        let value = snapshot(editor.as_ref());
        tracing::debug!(%mount_id, "editor bridge initialized");

        Ok(Self {
            editor,
            mount_id,
            signal,
            throttle: Throttle::new(throttle_window),
            value,
            listener: None,
        })
    }

    /// The mount identifier this bridge's widget is bound to.
    pub fn mount_id(&self) -> &str {
        &self.mount_id
    }

    /// Register the change listener. Each throttled delivery reaches both
    /// the listener and the bound value returned by [`content`](Self::content).
    pub fn on_change(&mut self, listener: ChangeListener) {
        self.listener = Some(listener);
    }

    /// The bound content value: the snapshot from the most recent delivery
    /// (or from initialization/replacement, before any change fired).
    pub fn content(&self) -> &ContentSnapshot {
        &self.value
    }

    /// Replace the widget's content with a new envelope.
    ///
    /// Re-runs the seeding paths against the live widget and refreshes the
    /// bound value.
    pub fn set_content(
        &mut self,
        envelope: ContentEnvelope,
    ) -> Result<(), EditorError> {
        seed(self.editor.as_mut(), &envelope)?;
        self.value = snapshot(self.editor.as_ref());
        Ok(())
    }

    /// Query the widget for a snapshot right now, bypassing the throttle.
    pub fn snapshot_now(&self) -> ContentSnapshot {
        snapshot(self.editor.as_ref())
    }

    /// Advance the bridge's clock.
    ///
    /// Drains pending change notifications into the throttle and, when a
    /// window has expired, snapshots the widget and delivers: the listener
    /// is invoked and the bound value replaced. Returns the delivered
    /// snapshot, if any.
    pub fn tick(&mut self, now: Instant) -> Option<&ContentSnapshot> {
        let pending = self.signal.take();
        if pending > 0 {
            self.throttle.notify(now);
            if pending > 1 {
                tracing::trace!(
                    coalesced = pending - 1,
                    "coalescing change notifications"
                );
            }
        }

        if !self.throttle.fire(now) {
            return None;
        }

        self.value = snapshot(self.editor.as_ref());
        if let Some(listener) = &mut self.listener {
            listener(&self.value);
        }
        Some(&self.value)
    }

    /// When the next delivery falls due, if a change is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.throttle.next_deadline()
    }
}

/// Push an envelope into the widget through the matching load path.
fn seed(
    editor: &mut dyn EditorCollaborator,
    envelope: &ContentEnvelope,
) -> Result<(), EditorError> {
    match envelope {
        ContentEnvelope::Html(html) => editor.paste_html(html),
        ContentEnvelope::Delta(document) => editor.set_delta(document),
    }
}

/// Snapshot all three content projections from the widget.
fn snapshot(editor: &dyn EditorCollaborator) -> ContentSnapshot {
    ContentSnapshot {
        delta: editor.delta(),
        plain_text: editor.plain_text(),
        html: editor.html(),
    }
}
