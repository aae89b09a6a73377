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

//! Adapter between the widget's image-upload protocol and an external
//! upload service.
//!
//! The widget hands the adapter a file and a completion callback. On
//! success the callback receives the widget protocol's success envelope
//! (`{"code": 0, "data": {"imageUrl": ...}}`). On failure the callback is
//! **not** invoked — the widget is left treating the upload as incomplete —
//! and a transient user-visible message goes to the error sink instead.
//! The loading flag is cleared on every exit path via a scoped guard.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;
use thiserror::Error;
use url::Url;

/// A file picked by the user, as the widget delivers it.
#[derive(Clone, Debug)]
pub struct UploadFile {
    pub name: String,
    /// MIME type, as sniffed or reported by the widget.
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Failures reported by an [`UploadService`].
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload transport failed: {0}")]
    Transport(String),

    #[error("upload rejected: {0}")]
    Rejected(String),
}

/// The external upload collaborator: takes a file, returns a durable URL.
///
/// The call suspends the caller until the round trip resolves. No
/// cancellation is supported for in-flight uploads.
pub trait UploadService {
    fn upload(&self, file: &UploadFile) -> Result<Url, UploadError>;
}

/// The widget protocol's upload completion envelope.
#[derive(Clone, Debug, Serialize)]
pub struct UploadReply {
    pub code: i32,
    pub data: UploadReplyData,
}

#[derive(Clone, Debug, Serialize)]
pub struct UploadReplyData {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

impl UploadReply {
    /// The success envelope for a durable URL.
    pub fn success(url: &Url) -> Self {
        Self {
            code: 0,
            data: UploadReplyData {
                image_url: url.to_string(),
            },
        }
    }
}

/// Owns one [`UploadService`] and speaks the widget's completion protocol.
pub struct ImageUploadAdapter {
    service: Box<dyn UploadService>,
    loading: Rc<Cell<bool>>,
    error_sink: Option<Box<dyn FnMut(String)>>,
}

impl ImageUploadAdapter {
    pub fn new(service: Box<dyn UploadService>) -> Self {
        Self {
            service,
            loading: Rc::new(Cell::new(false)),
            error_sink: None,
        }
    }

    /// Register the sink for transient user-visible error messages.
    pub fn on_error(&mut self, sink: Box<dyn FnMut(String)>) {
        self.error_sink = Some(sink);
    }

    /// Whether an upload is currently in flight.
    pub fn loading(&self) -> bool {
        self.loading.get()
    }

    /// A shared handle to the loading flag, for host UI that wants to
    /// observe it without holding the adapter.
    pub fn loading_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.loading)
    }

    /// Handle one upload request from the widget.
    ///
    /// `done` is the widget's completion callback; it is invoked with the
    /// success envelope only when the service returns a URL.
    pub fn handle_upload(
        &mut self,
        file: &UploadFile,
        done: &mut dyn FnMut(UploadReply),
    ) {
        let _loading = LoadingGuard::acquire(&self.loading);

        match self.service.upload(file) {
            Ok(url) => done(UploadReply::success(&url)),
            Err(err) => {
                tracing::warn!(name = %file.name, %err, "image upload failed");
                if let Some(sink) = &mut self.error_sink {
                    sink(format!("Image upload failed: {err}"));
                }
                // The widget's callback is deliberately not invoked: it
                // treats the upload as not completed.
            }
        }
    }
}

/// Scoped acquisition of the loading flag. The flag is guaranteed cleared
/// on every exit path, including failure.
struct LoadingGuard {
    flag: Rc<Cell<bool>>,
}

impl LoadingGuard {
    fn acquire(flag: &Rc<Cell<bool>>) -> Self {
        flag.set(true);
        Self {
            flag: Rc::clone(flag),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
