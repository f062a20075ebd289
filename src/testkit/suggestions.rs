//! Scripted [`SuggestionSource`] double.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::SuggestionGroup;
use crate::error::Result;
use crate::ports::SuggestionSource;

/// A suggestion source with pre-loaded fetch results.
///
/// Each `fetch` pops the next scripted result; exhausted scripts answer
/// `Ok(None)` ("nothing usable"), which forces the synthesized fallback.
pub struct ScriptedSuggestions {
    results: Mutex<VecDeque<Result<Option<Vec<SuggestionGroup>>>>>,
    fetch_count: AtomicU32,
}

impl ScriptedSuggestions {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            fetch_count: AtomicU32::new(0),
        }
    }

    pub fn with_results(self, results: Vec<Result<Option<Vec<SuggestionGroup>>>>) -> Self {
        *self.results.lock() = results.into();
        self
    }

    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedSuggestions {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SuggestionSource for ScriptedSuggestions {
    async fn fetch(&self, _commander_name: &str) -> Result<Option<Vec<SuggestionGroup>>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(None))
    }
}
