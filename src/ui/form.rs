use iced::widget::{button, column, container, horizontal_space, image, row, text};
use iced::{Alignment, Element, Length};

use crate::state::form::{InputKind, Notice, Phase, UploadForm};
use crate::state::prefs::ThemePreference;
use crate::Message;

/// Displayed width of an input preview
const PREVIEW_WIDTH: f32 = 260.0;

/// Build the whole upload page
pub fn view<'a>(form: &'a UploadForm, theme: ThemePreference) -> Element<'a, Message> {
    let header = row![
        text("Thermal Align").size(32),
        horizontal_space(),
        theme_toggle(theme),
    ]
    .align_y(Alignment::Center)
    .width(Length::Fill);

    let inputs = row![
        input_card(form, InputKind::Thermal),
        input_card(form, InputKind::Rgb),
    ]
    .spacing(24);

    let mut content = column![header, inputs, submit_button(form)]
        .spacing(24)
        .padding(40)
        .align_x(Alignment::Center)
        .max_width(760);

    if let Some(notice) = form.notice() {
        content = content.push(notice_banner(notice));
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

/// Button that flips the theme; its label advertises the other mode
fn theme_toggle(theme: ThemePreference) -> Element<'static, Message> {
    let label = match theme {
        ThemePreference::Light => "🌙 Dark",
        ThemePreference::Dark => "☀️ Light",
    };

    button(text(label))
        .style(button::secondary)
        .on_press(Message::ToggleTheme)
        .padding([6.0, 12.0])
        .into()
}

/// One input slot: picker button, selected filename, inline preview
fn input_card(form: &UploadForm, kind: InputKind) -> Element<'_, Message> {
    let slot = form.slot(kind);

    let (title, prompt) = match kind {
        InputKind::Thermal => ("Thermal image", "Choose thermal…"),
        InputKind::Rgb => ("RGB image", "Choose RGB…"),
    };

    let preview: Element<'_, Message> = match slot.preview() {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(PREVIEW_WIDTH))
            .into(),
        None => container(text("No preview").size(14))
            .center_x(Length::Fixed(PREVIEW_WIDTH))
            .center_y(Length::Fixed(160.0))
            .into(),
    };

    let file_label = slot
        .file_name()
        .unwrap_or_else(|| "No file selected".to_string());

    let card = column![
        text(title).size(18),
        preview,
        text(file_label).size(14),
        button(text(prompt))
            .on_press(Message::PickInput(kind))
            .padding([8.0, 16.0]),
    ]
    .spacing(12)
    .align_x(Alignment::Center);

    container(card)
        .padding(16)
        .style(container::bordered_box)
        .into()
}

/// Submit control: armed only when both inputs are selected, swapped for
/// a loading label while the request is in flight
fn submit_button(form: &UploadForm) -> Element<'_, Message> {
    let label = match form.phase() {
        Phase::Submitting => "⏳ Aligning…",
        _ => "Align Images",
    };

    let mut submit = button(text(label).size(18))
        .style(button::primary)
        .padding([10.0, 24.0]);

    if form.phase() == Phase::Ready {
        submit = submit.on_press(Message::Submit);
    }

    submit.into()
}

/// The single success-or-error message under the form
fn notice_banner(notice: &Notice) -> Element<'_, Message> {
    match notice {
        Notice::Success(message) => container(text(message.as_str()).style(text::success))
            .padding([8.0, 12.0])
            .into(),
        Notice::Error(message) => container(text(message.as_str()).style(text::danger))
            .padding([8.0, 12.0])
            .into(),
    }
}
