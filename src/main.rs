use iced::{Element, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

// Declare the application modules
mod api;
mod preview;
mod state;
mod ui;

use api::{AlignClient, AlignOutcome};
use state::form::{InputKind, Notice, UploadForm};
use state::prefs::{DiskStore, Preferences, PrefsStore};

/// Main application state
struct ThermalAlign {
    /// User preferences (theme, endpoint), applied live
    prefs: Preferences,
    /// Where preferences persist; None when no store could be set up
    prefs_store: Option<DiskStore>,
    /// The upload form state machine
    form: UploadForm,
    /// Client for the alignment endpoint
    client: AlignClient,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the theme toggle
    ToggleTheme,
    /// User clicked one of the two file pickers
    PickInput(InputKind),
    /// Background preview decode finished
    PreviewLoaded(InputKind, Result<iced::widget::image::Handle, String>),
    /// User clicked the submit button
    Submit,
    /// Background submission finished with a user-facing message
    SubmitFinished(Result<String, String>),
}

impl ThermalAlign {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // A missing preferences store is logged and skipped; the theme
        // toggle keeps working for the session, unpersisted.
        let prefs_store = match DiskStore::at_default_location() {
            Ok(store) => {
                println!("📁 Preferences file: {}", store.path().display());
                Some(store)
            }
            Err(e) => {
                eprintln!("⚠️  Preferences unavailable ({}); theme changes will not persist", e);
                None
            }
        };

        let prefs = match prefs_store.as_ref().map(PrefsStore::load) {
            Some(Ok(Some(stored))) => stored,
            Some(Err(e)) => {
                eprintln!("⚠️  Could not read preferences ({}); using defaults", e);
                Preferences::default()
            }
            _ => Preferences::default(),
        };

        let client = AlignClient::new(prefs.server_url.clone());

        println!(
            "🌡️  Thermal Align ready ({} theme). Endpoint: {}",
            prefs.theme,
            client.endpoint()
        );

        (
            ThermalAlign {
                prefs,
                prefs_store,
                form: UploadForm::default(),
                client,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ToggleTheme => {
                self.prefs.theme = self.prefs.theme.toggled();
                println!("🎨 Theme switched to: {}", self.prefs.theme);

                if let Some(store) = &self.prefs_store {
                    if let Err(e) = store.save(&self.prefs) {
                        eprintln!("⚠️  Failed to persist preferences: {}", e);
                    }
                }

                Task::none()
            }
            Message::PickInput(kind) => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title(match kind {
                        InputKind::Thermal => "Select Thermal Image",
                        InputKind::Rgb => "Select RGB Image",
                    })
                    .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tif", "tiff", "webp"])
                    .add_filter("All files", &["*"])
                    .pick_file();

                if let Some(path) = file {
                    self.form.select(kind, path.clone());

                    // Decode the preview in the background
                    return Task::perform(preview::load_preview(path), move |result| {
                        Message::PreviewLoaded(kind, result)
                    });
                }

                Task::none()
            }
            Message::PreviewLoaded(kind, Ok(handle)) => {
                self.form.set_preview(kind, Some(handle));
                Task::none()
            }
            Message::PreviewLoaded(kind, Err(reason)) => {
                // Not a displayable image: keep the selection, drop the preview
                eprintln!("⚠️  No preview for {} input: {}", kind.field_name(), reason);
                self.form.set_preview(kind, None);
                Task::none()
            }
            Message::Submit => match self.form.begin_submit() {
                Some((thermal, rgb)) => {
                    let client = self.client.clone();

                    Task::perform(run_alignment(client, thermal, rgb), Message::SubmitFinished)
                }
                // begin_submit already surfaced the inline error
                None => Task::none(),
            },
            Message::SubmitFinished(result) => {
                // Re-arm the submit control in every path
                self.form.finish();

                match result {
                    Ok(message) => {
                        println!("✅ {}", message);
                        self.form.set_notice(Notice::Success(message));
                    }
                    Err(message) => {
                        eprintln!("⚠️  Alignment failed: {}", message);
                        self.form.set_notice(Notice::Error(message));
                    }
                }

                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        ui::form::view(&self.form, self.prefs.theme)
    }

    /// Set the application theme from the stored preference
    fn theme(&self) -> Theme {
        self.prefs.theme.to_theme()
    }
}

fn main() -> iced::Result {
    iced::application(
        "Thermal Align",
        ThermalAlign::update,
        ThermalAlign::view,
    )
    .theme(ThermalAlign::theme)
    .centered()
    .run_with(ThermalAlign::new)
}

/// Drive one submission end to end: upload, classify, save on success
///
/// Every path collapses to the single user-facing message the form shows,
/// so the update loop only has to route it.
async fn run_alignment(
    client: AlignClient,
    thermal: PathBuf,
    rgb: PathBuf,
) -> Result<String, String> {
    let outcome = client
        .submit(&thermal, &rgb)
        .await
        .map_err(|e| e.to_string())?;

    match outcome {
        AlignOutcome::Aligned(bytes) => {
            let path = api::download::save_aligned(bytes).await?;

            Ok(format!(
                "Image processed successfully! Aligned thermal image saved to {}.",
                path.display()
            ))
        }
        AlignOutcome::Rejected(message) => Err(message),
    }
}
