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

//! The delta document model produced by the embedded editor widget.
//!
//! A [`DeltaDocument`] is an ordered sequence of insertion operations, each
//! carrying plain text, an image reference, or a math expression, plus an
//! optional [`AttributeSet`]. Payload shapes are discriminated exactly once,
//! at ingestion ([`DeltaDocument::from_value`]); consumers match on the
//! resulting [`OpPayload`] tag and never re-inspect raw JSON.

mod attributes;
mod document;
mod error;

pub use attributes::AttributeSet;
pub use document::{DeltaDocument, DeltaOp, OpPayload};
pub use error::DeltaParseError;
