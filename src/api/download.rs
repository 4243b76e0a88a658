/// Saving aligned results
///
/// The service returns the aligned thermal image as a JPEG body; it lands
/// in the user's download directory under a fixed name, mirroring what the
/// service itself suggests.

use std::path::{Path, PathBuf};
use tokio::task;

/// Output name the service attaches to aligned images
pub const ALIGNED_FILENAME: &str = "aligned_AT.JPG";

/// Write the aligned image next to the user's other downloads
///
/// Runs on a blocking task; returns the final path for the success
/// message.
pub async fn save_aligned(bytes: Vec<u8>) -> Result<PathBuf, String> {
    task::spawn_blocking(move || {
        let dir = download_dir()?;
        save_aligned_in(&dir, &bytes)
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
}

/// Blocking write of the aligned image into a directory
fn save_aligned_in(dir: &Path, bytes: &[u8]) -> Result<PathBuf, String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;

    let path = dir.join(ALIGNED_FILENAME);
    std::fs::write(&path, bytes)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

    println!("📥 Saved aligned image: {}", path.display());
    Ok(path)
}

/// Where downloads go on this platform
fn download_dir() -> Result<PathBuf, String> {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| "Could not determine a download directory".to_string())
}
