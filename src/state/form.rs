/// Upload form state machine
///
/// Owns the two input slots and the submission phase. The UI renders
/// purely from this state; transitions happen in the app's update loop:
///
///   Idle ──select both──▶ Ready ──begin_submit──▶ Submitting ──finish──▶ Ready
///
/// The latest submission result lives in `notice` (success and error are
/// mutually exclusive).

use iced::widget::image;
use std::path::{Path, PathBuf};

/// Which of the two required inputs a slot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Thermal,
    Rgb,
}

impl InputKind {
    /// Multipart field name the service expects for this input
    pub fn field_name(self) -> &'static str {
        match self {
            InputKind::Thermal => "thermal",
            InputKind::Rgb => "rgb",
        }
    }
}

/// One selected file plus its decoded preview (None when the file is not
/// a displayable image)
#[derive(Debug, Clone, Default)]
pub struct InputSlot {
    path: Option<PathBuf>,
    preview: Option<image::Handle>,
}

impl InputSlot {
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Filename to show next to the picker
    pub fn file_name(&self) -> Option<String> {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
    }

    pub fn preview(&self) -> Option<&image::Handle> {
        self.preview.as_ref()
    }
}

/// High-level submission phase, driving which controls are live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for both inputs; submit disabled
    #[default]
    Idle,
    /// Both inputs selected; submit enabled
    Ready,
    /// Request in flight; submit disabled, loading label shown
    Submitting,
}

/// The single user-visible result message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Complete state of the upload form
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    thermal: InputSlot,
    rgb: InputSlot,
    phase: Phase,
    notice: Option<Notice>,
}

impl UploadForm {
    pub fn slot(&self, kind: InputKind) -> &InputSlot {
        match kind {
            InputKind::Thermal => &self.thermal,
            InputKind::Rgb => &self.rgb,
        }
    }

    fn slot_mut(&mut self, kind: InputKind) -> &mut InputSlot {
        match kind {
            InputKind::Thermal => &mut self.thermal,
            InputKind::Rgb => &mut self.rgb,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Both inputs hold a file (decodability does not matter here)
    pub fn is_ready(&self) -> bool {
        self.thermal.path.is_some() && self.rgb.path.is_some()
    }

    /// Replace a slot's file wholesale. The old preview is dropped until
    /// the new one finishes decoding.
    pub fn select(&mut self, kind: InputKind, path: PathBuf) {
        let slot = self.slot_mut(kind);
        slot.path = Some(path);
        slot.preview = None;
        self.recompute_phase();
    }

    /// Attach (or clear) the decoded preview for a slot
    pub fn set_preview(&mut self, kind: InputKind, preview: Option<image::Handle>) {
        self.slot_mut(kind).preview = preview;
    }

    /// Validate and enter the Submitting phase.
    ///
    /// Returns the two selected paths, or sets an inline error notice and
    /// stays put when either input is missing.
    pub fn begin_submit(&mut self) -> Option<(PathBuf, PathBuf)> {
        self.notice = None;

        match (self.thermal.path.clone(), self.rgb.path.clone()) {
            (Some(thermal), Some(rgb)) => {
                self.phase = Phase::Submitting;
                Some((thermal, rgb))
            }
            _ => {
                self.notice = Some(Notice::Error(
                    "Please select both thermal and RGB images.".to_string(),
                ));
                None
            }
        }
    }

    /// Leave the Submitting phase, re-arming the submit control
    pub fn finish(&mut self) {
        self.phase = if self.is_ready() {
            Phase::Ready
        } else {
            Phase::Idle
        };
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    fn recompute_phase(&mut self) {
        // An in-flight request keeps its phase; finish() re-evaluates.
        if self.phase != Phase::Submitting {
            self.phase = if self.is_ready() {
                Phase::Ready
            } else {
                Phase::Idle
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_preview() -> image::Handle {
        image::Handle::from_rgba(1, 1, vec![0u8; 4])
    }

    #[test]
    fn test_ready_iff_both_inputs_selected() {
        let mut form = UploadForm::default();
        assert!(!form.is_ready());
        assert_eq!(form.phase(), Phase::Idle);

        form.select(InputKind::Thermal, PathBuf::from("a_T.JPG"));
        assert!(!form.is_ready());
        assert_eq!(form.phase(), Phase::Idle);

        form.select(InputKind::Rgb, PathBuf::from("a_Z.JPG"));
        assert!(form.is_ready());
        assert_eq!(form.phase(), Phase::Ready);
    }

    #[test]
    fn test_reselecting_replaces_file_and_drops_preview() {
        let mut form = UploadForm::default();
        form.select(InputKind::Thermal, PathBuf::from("first.jpg"));
        form.set_preview(InputKind::Thermal, Some(dummy_preview()));
        assert!(form.slot(InputKind::Thermal).preview().is_some());

        form.select(InputKind::Thermal, PathBuf::from("second.jpg"));
        assert_eq!(
            form.slot(InputKind::Thermal).file_name().as_deref(),
            Some("second.jpg")
        );
        assert!(form.slot(InputKind::Thermal).preview().is_none());
    }

    #[test]
    fn test_non_image_selection_clears_preview_but_stays_selected() {
        let mut form = UploadForm::default();
        form.select(InputKind::Rgb, PathBuf::from("photo.jpg"));
        form.set_preview(InputKind::Rgb, Some(dummy_preview()));

        // User swaps in a file that fails to decode.
        form.select(InputKind::Rgb, PathBuf::from("notes.txt"));
        form.set_preview(InputKind::Rgb, None);

        assert!(form.slot(InputKind::Rgb).preview().is_none());
        assert!(form.slot(InputKind::Rgb).path().is_some());
    }

    #[test]
    fn test_begin_submit_requires_both_inputs() {
        let mut form = UploadForm::default();
        form.select(InputKind::Thermal, PathBuf::from("a_T.JPG"));

        assert!(form.begin_submit().is_none());
        assert_eq!(form.phase(), Phase::Idle);
        assert_eq!(
            form.notice(),
            Some(&Notice::Error(
                "Please select both thermal and RGB images.".to_string()
            ))
        );
    }

    #[test]
    fn test_begin_submit_enters_submitting_and_clears_notice() {
        let mut form = UploadForm::default();
        form.set_notice(Notice::Error("stale".to_string()));
        form.select(InputKind::Thermal, PathBuf::from("a_T.JPG"));
        form.select(InputKind::Rgb, PathBuf::from("a_Z.JPG"));

        let paths = form.begin_submit().unwrap();
        assert_eq!(paths.0, PathBuf::from("a_T.JPG"));
        assert_eq!(paths.1, PathBuf::from("a_Z.JPG"));
        assert_eq!(form.phase(), Phase::Submitting);
        assert_eq!(form.notice(), None);
    }

    #[test]
    fn test_finish_restores_ready_state() {
        let mut form = UploadForm::default();
        form.select(InputKind::Thermal, PathBuf::from("a_T.JPG"));
        form.select(InputKind::Rgb, PathBuf::from("a_Z.JPG"));
        form.begin_submit().unwrap();

        form.finish();
        form.set_notice(Notice::Error(
            "Network error. Please check your connection and try again.".to_string(),
        ));

        // Files are still selected, so the control re-arms.
        assert_eq!(form.phase(), Phase::Ready);
    }

    #[test]
    fn test_notice_is_mutually_exclusive() {
        let mut form = UploadForm::default();
        form.set_notice(Notice::Error("bad".to_string()));
        form.set_notice(Notice::Success("good".to_string()));

        assert_eq!(form.notice(), Some(&Notice::Success("good".to_string())));
    }

    #[test]
    fn test_selection_during_submit_keeps_phase() {
        let mut form = UploadForm::default();
        form.select(InputKind::Thermal, PathBuf::from("a_T.JPG"));
        form.select(InputKind::Rgb, PathBuf::from("a_Z.JPG"));
        form.begin_submit().unwrap();

        form.select(InputKind::Thermal, PathBuf::from("b_T.JPG"));
        assert_eq!(form.phase(), Phase::Submitting);

        form.finish();
        assert_eq!(form.phase(), Phase::Ready);
    }
}
