/*
 *   Copyright (c) 2025 R3BL LLC
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

use std::sync::atomic::{AtomicUsize, Ordering};

/// Running maximum of topic depths (level counts) seen so far. The rainbow gradient
/// divides its palette by this maximum, so the gradient gets coarser as deeper topics
/// are observed and never finer; the value only grows, it is never reset.
///
/// Shared between composers via `Arc` inside [crate::StyleConfig]. Concurrent
/// [Self::record_depth] calls from multiple threads are serialized by the atomic
/// max-and-store, so every thread observes a globally consistent maximum.
#[derive(Debug, Default)]
pub struct TopicDepthTracker {
    max_depth: AtomicUsize,
}

pub mod topic_depth_tracker_impl {
    use super::*;

    impl TopicDepthTracker {
        #[must_use]
        pub fn new() -> TopicDepthTracker { TopicDepthTracker::default() }

        /// Record a topic's level count. Keeps the larger of the stored maximum and
        /// `depth`.
        pub fn record_depth(&self, depth: usize) {
            self.max_depth.fetch_max(depth, Ordering::SeqCst);
        }

        #[must_use]
        pub fn current_max(&self) -> usize { self.max_depth.load(Ordering::SeqCst) }
    }
}
