/// Alignment service integration
///
/// This module handles:
/// - Uploading the thermal/RGB pair as a multipart request
/// - Classifying the service's response (image body vs JSON error)
/// - Saving the aligned result to the user's download folder

pub mod client;
pub mod download;

pub use client::{AlignClient, AlignOutcome};
