/// Inline preview generation for selected inputs
///
/// Selected files are decoded and downscaled off the UI thread; anything
/// that does not decode as an image is reported as an error, which clears
/// the slot's preview.

use iced::widget::image::Handle;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use tokio::task;

/// Longest edge of a rendered preview
const PREVIEW_SIZE: u32 = 512;

/// Decode a selected file into a preview handle
///
/// Runs on a blocking task because image decode is CPU-intensive.
///
/// # Returns
/// * `Ok(handle)` - Downscaled RGBA preview ready for the image widget
/// * `Err(String)` - File unreadable or not a displayable image
pub async fn load_preview(path: PathBuf) -> Result<Handle, String> {
    task::spawn_blocking(move || load_preview_blocking(&path))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

/// Blocking implementation of preview decoding
fn load_preview_blocking(path: &Path) -> Result<Handle, String> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let img = image::load_from_memory(&bytes)
        .map_err(|e| format!("Not a displayable image: {}", e))?;

    // Decode at full size, show at preview size
    let preview = img.resize(PREVIEW_SIZE, PREVIEW_SIZE, FilterType::Lanczos3);
    let rgba = preview.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(Handle::from_rgba(width, height, rgba.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_file_produces_preview() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");

        let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([200, 40, 40, 255]));
        img.save(&path).unwrap();

        assert!(load_preview_blocking(&path).is_ok());
    }

    #[test]
    fn test_non_image_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "definitely not pixels").unwrap();

        assert!(load_preview_blocking(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let result = load_preview_blocking(Path::new("/nonexistent/preview.jpg"));
        assert!(result.is_err());
    }
}
