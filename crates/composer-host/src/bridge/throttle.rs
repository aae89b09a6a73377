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

//! Trailing-edge throttle over an injected clock.
//!
//! Pure state, no timers: the host supplies `Instant`s. The first observed
//! notification opens a window; further notifications within the window
//! change nothing (they are coalesced by the caller snapshotting at
//! delivery time); [`Throttle::fire`] returns `true` once per window, at or
//! after its deadline. This yields at most one delivery per window, with
//! the delivery reflecting the most recent change.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub(crate) struct Throttle {
    window: Duration,
    deadline: Option<Instant>,
}

impl Throttle {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Record that a change was observed at `now`. Opens a window if none
    /// is pending.
    pub(crate) fn notify(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.window);
        }
    }

    /// When the pending window expires, if one is open.
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the pending window has expired. Returns `true` at most once
    /// per window and closes it.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
