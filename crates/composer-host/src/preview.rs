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

//! Read-only preview transform for rendered HTML.

use once_cell::sync::Lazy;
use regex::Regex;

static MATH_FIELD_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new("<math-field").expect("valid math-field pattern"));

/// Rewrite rendered HTML so embedded math fields are read-only.
///
/// Every `<math-field` opening tag gains the `read-only` marker; all other
/// markup is untouched. This is a purely textual substitution — the markup
/// tree is not parsed — and it is **not** idempotent: applying it to
/// already-transformed HTML duplicates the marker.
pub fn to_preview(markup: &str) -> String {
    MATH_FIELD_OPEN
        .replace_all(markup, "<math-field read-only")
        .into_owned()
}
