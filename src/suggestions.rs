//! Item-name autocomplete
//!
//! Keystrokes are debounced, normalized and looked up in a session-wide
//! cache before any backend call. See [`SuggestionState`] for the lookup
//! state machine.

mod debouncer;
mod suggestion_cache;
pub mod suggestion_render;
mod suggestion_state;

pub use debouncer::Debouncer;
pub use suggestion_cache::SuggestionCache;
pub use suggestion_state::{LookupFailure, SuggestionPhase, SuggestionState, normalize};
