//! Debounced, cached suggestion lookup
//!
//! Phases: `Idle -> Debouncing -> Fetching -> Settled`. Input schedules a
//! lookup; once the debounce delay passes, a cached result settles at once
//! and a miss goes to the backend. Responses are applied in arrival order
//! with no request ids, so a late response for an older query can replace a
//! newer one (last write wins).

use std::time::{Duration, Instant};

use super::{Debouncer, SuggestionCache};
use crate::backend::{BackendError, ErrorKind};
use crate::config::SuggestionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestionPhase {
    /// Nothing typed, or input cleared
    #[default]
    Idle,
    /// Waiting for typing to pause
    Debouncing,
    /// At least one backend lookup outstanding
    Fetching,
    /// Latest lookup answered (from cache or backend)
    Settled,
}

/// Why the last lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFailure {
    SessionExpired,
    PermissionDenied,
    Generic,
}

impl LookupFailure {
    pub fn from_error(error: &BackendError) -> Self {
        match error.kind() {
            ErrorKind::SessionExpired => LookupFailure::SessionExpired,
            ErrorKind::PermissionDenied => LookupFailure::PermissionDenied,
            ErrorKind::Other => LookupFailure::Generic,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            LookupFailure::SessionExpired => "Your session has expired. Please log in again.",
            LookupFailure::PermissionDenied => "You don't have permission to look up suggestions.",
            LookupFailure::Generic => "Failed to load suggestions.",
        }
    }
}

/// Lowercased, trimmed form used for cache keys and backend matching.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Debug)]
pub struct SuggestionState {
    enabled: bool,
    max_results: usize,
    phase: SuggestionPhase,
    debouncer: Debouncer<String>,
    cache: SuggestionCache,
    suggestions: Vec<String>,
    selected: Option<usize>,
    in_flight: usize,
    failure: Option<LookupFailure>,
}

impl SuggestionState {
    pub fn new(config: &SuggestionConfig) -> Self {
        Self {
            enabled: config.enabled,
            max_results: config.max_results,
            phase: SuggestionPhase::Idle,
            debouncer: Debouncer::new(Duration::from_millis(config.debounce_ms)),
            cache: SuggestionCache::new(),
            suggestions: Vec::new(),
            selected: None,
            in_flight: 0,
            failure: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn phase(&self) -> SuggestionPhase {
        self.phase
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// True while any backend lookup is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn failure(&self) -> Option<LookupFailure> {
        self.failure
    }

    pub fn cache(&self) -> &SuggestionCache {
        &self.cache
    }

    /// React to the input text changing.
    ///
    /// Blank input clears the suggestions at once and drops any pending
    /// lookup.
    pub fn on_input(&mut self, raw: &str, now: Instant) {
        if !self.enabled {
            return;
        }

        let normalized = normalize(raw);
        if normalized.is_empty() {
            self.clear();
            return;
        }

        self.debouncer.schedule(normalized, now);
        self.phase = SuggestionPhase::Debouncing;
    }

    /// Fire a due lookup. Returns the normalized query when the backend has
    /// to be asked; cache hits settle immediately and return `None`.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let query = self.debouncer.take_due(now)?;

        if let Some(hit) = self.cache.get(&query) {
            log::debug!("suggestion cache hit for {:?}", query);
            self.suggestions = hit.to_vec();
            self.selected = None;
            self.failure = None;
            self.phase = SuggestionPhase::Settled;
            return None;
        }

        self.in_flight += 1;
        self.phase = SuggestionPhase::Fetching;
        Some(query)
    }

    /// Take back a lookup `poll` handed out that was never sent.
    pub fn cancel_in_flight(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.phase == SuggestionPhase::Fetching && self.in_flight == 0 {
            self.phase = SuggestionPhase::Settled;
        }
    }

    /// Apply a backend answer for `query`.
    pub fn on_response(&mut self, query: &str, result: Result<Vec<String>, BackendError>) {
        self.in_flight = self.in_flight.saturating_sub(1);

        // Cleared while the lookup was out: keep the answer for later only
        if self.phase == SuggestionPhase::Idle {
            if let Ok(mut names) = result {
                names.truncate(self.max_results);
                self.cache.put(query, names);
            }
            return;
        }

        match result {
            Ok(mut names) => {
                names.truncate(self.max_results);
                self.cache.put(query, names.clone());
                self.suggestions = names;
                self.failure = None;
            }
            Err(e) => {
                log::debug!("suggestion lookup for {:?} failed: {}", query, e);
                self.suggestions.clear();
                self.failure = Some(LookupFailure::from_error(&e));
            }
        }
        self.selected = None;

        if self.phase == SuggestionPhase::Fetching && self.in_flight == 0 {
            self.phase = SuggestionPhase::Settled;
        }
    }

    /// Drop visible suggestions and any pending lookup. The cache is kept.
    pub fn clear(&mut self) {
        self.debouncer.cancel();
        self.suggestions.clear();
        self.selected = None;
        self.failure = None;
        self.phase = SuggestionPhase::Idle;
    }

    /// Forget everything, cache included (used on log-out).
    pub fn reset(&mut self) {
        self.clear();
        self.cache.clear();
        self.in_flight = 0;
    }

    pub fn select_next(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.suggestions.len(),
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        let last = self.suggestions.len() - 1;
        self.selected = Some(match self.selected {
            Some(0) | None => last,
            Some(i) => i - 1,
        });
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.suggestions.get(i))
            .map(String::as_str)
    }
}

#[cfg(test)]
#[path = "suggestion_state_tests.rs"]
mod suggestion_state_tests;
