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

//! Host-side glue for an embedded rich-text editor widget.
//!
//! The widget owns the hard parts — document mutation, the math-input
//! keyboard, undo/redo, selection. This crate owns the rest:
//!
//! - [`render`] converts the widget's delta document into HTML,
//!   independently of any live widget instance.
//! - [`to_preview`] rewrites rendered HTML so embedded math fields are
//!   read-only for display surfaces.
//! - [`EditorBridge`] owns one live widget instance: it seeds initial
//!   content, throttles change notifications with trailing-edge
//!   coalescing, and delivers [`ContentSnapshot`]s to the host.
//! - [`ImageUploadAdapter`] speaks the widget's image-upload completion
//!   protocol against an external [`UploadService`].
//!
//! The widget itself is reached only through the [`EditorCollaborator`]
//! contract; implementations live with the platform layer that embeds the
//! widget, and tests use scripted fakes.

pub mod bridge;
pub mod content;
pub mod editor;
pub mod preview;
pub mod render;
pub mod upload;

pub use bridge::EditorBridge;
pub use content::{ContentEnvelope, ContentSnapshot};
pub use editor::{
    next_mount_id, ChangeSignal, CharLimit, EditorCollaborator, EditorError,
    EditorFactory, EditorOptions,
};
pub use preview::to_preview;
pub use render::render;
pub use upload::{
    ImageUploadAdapter, UploadError, UploadFile, UploadReply, UploadService,
};
