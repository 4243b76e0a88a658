/// State management module
///
/// This module owns everything the UI reads and mutates:
/// - Persisted user preferences and their storage (prefs.rs)
/// - The upload form state machine (form.rs)

pub mod form;
pub mod prefs;
