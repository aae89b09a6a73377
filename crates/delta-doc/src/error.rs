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

use thiserror::Error;

/// Errors raised while ingesting a delta document from JSON.
///
/// Only the top-level shape can fail: individual operations the ingester
/// does not recognize become [`OpPayload::Unknown`](crate::OpPayload)
/// instead of erroring.
#[derive(Debug, Error)]
pub enum DeltaParseError {
    #[error("delta document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("delta document must be an array of operations or an object with an `ops` array")]
    NotADocument,
}
