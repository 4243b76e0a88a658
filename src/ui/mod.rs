/// UI rendering module
///
/// Pure view code: everything here builds widgets from application state
/// and emits `crate::Message` values. No state lives in this module.

pub mod form;
