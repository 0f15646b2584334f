//! Model weight downloads with progress reporting.
//!
//! Weights are fetched from Hugging Face into the local models directory,
//! written to a temp file first and renamed on success.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::ModelVariant;
use crate::error::CoreError;

// All downloads write `<dest>.bin.tmp` then rename, so concurrent fetches
// of the same variant would interleave writes into one temp file. Every
// caller serializes here, whichever command triggered the fetch.
static DOWNLOAD_LOCK: Mutex<()> = Mutex::new(());

/// Ensure a model's weights are available, downloading if needed.
///
/// Progress callbacks receive `(downloaded_bytes, total_bytes)`. Concurrent
/// calls for the same variant download once; the later caller waits and
/// picks up the freshly written weights.
pub fn ensure<F>(variant: ModelVariant, on_progress: F) -> Result<PathBuf, CoreError>
where
    F: Fn(u64, u64),
{
    ensure_at(variant, &variant.default_path(), on_progress)
}

fn ensure_at<F>(variant: ModelVariant, dest: &Path, on_progress: F) -> Result<PathBuf, CoreError>
where
    F: Fn(u64, u64),
{
    if dest.exists() {
        return Ok(dest.to_path_buf());
    }

    let _guard = DOWNLOAD_LOCK.lock().unwrap();

    // A wait usually means another caller was fetching these same weights
    if dest.exists() {
        return Ok(dest.to_path_buf());
    }

    download_with_progress(variant, dest, on_progress)?;
    Ok(dest.to_path_buf())
}

/// Download a model's weights with a progress callback.
///
/// The callback is invoked approximately every 1% of progress or every
/// 500KB, whichever is more frequent.
fn download_with_progress<F>(
    variant: ModelVariant,
    dest: &Path,
    on_progress: F,
) -> Result<(), CoreError>
where
    F: Fn(u64, u64),
{
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    crate::verbose!(
        "Downloading whisper model '{}' (~{} MB) from {}",
        variant,
        variant.size_mb(),
        variant.url()
    );

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(600)) // 10 min timeout for large files
        .build()
        .map_err(|e| CoreError::Download(format!("Failed to create HTTP client: {e}")))?;

    let mut response = client
        .get(variant.url())
        .send()
        .map_err(|e| CoreError::Download(format!("Failed to start download: {e}")))?;

    if !response.status().is_success() {
        return Err(CoreError::Download(format!(
            "HTTP {} from {}",
            response.status(),
            variant.url()
        )));
    }

    let total_size = response.content_length().unwrap_or(0);

    // Write to a temp file first, rename on success
    let temp_path = dest.with_extension("bin.tmp");
    let mut file = fs::File::create(&temp_path)?;

    let mut downloaded: u64 = 0;
    let mut buffer = [0u8; 8192];
    let mut last_callback_bytes: u64 = 0;

    on_progress(0, total_size);

    loop {
        let bytes_read = response
            .read(&mut buffer)
            .map_err(|e| CoreError::Download(format!("Download interrupted: {e}")))?;
        if bytes_read == 0 {
            break;
        }

        std::io::Write::write_all(&mut file, &buffer[..bytes_read])?;
        downloaded += bytes_read as u64;

        // Emit progress every ~1% or 500KB, whichever is more frequent
        let threshold = if total_size > 0 {
            (total_size / 100).min(500_000)
        } else {
            500_000
        };

        if downloaded - last_callback_bytes >= threshold {
            on_progress(downloaded, total_size);
            last_callback_bytes = downloaded;
        }
    }

    on_progress(downloaded, total_size);

    fs::rename(&temp_path, dest)?;

    crate::verbose!(
        "Download complete: {:.1} MB to {}",
        downloaded as f64 / 1_000_000.0,
        dest.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_installed_weights_skip_download() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("ggml-tiny.bin");
        fs::write(&dest, b"weights").unwrap();

        let path = ensure_at(ModelVariant::Tiny, &dest, |_, _| {
            panic!("no download expected for installed weights")
        })
        .unwrap();

        assert_eq!(path, dest);
        assert_eq!(fs::read(&dest).unwrap(), b"weights");
    }

    #[test]
    fn test_second_caller_reuses_concurrently_downloaded_weights() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("ggml-tiny.bin");

        // Pose as an in-progress download, then publish the weights before
        // releasing. The waiting caller must pick them up instead of
        // starting a second fetch.
        let guard = DOWNLOAD_LOCK.lock().unwrap();
        let dest_for_caller = dest.clone();
        let caller = thread::spawn(move || {
            ensure_at(ModelVariant::Tiny, &dest_for_caller, |_, _| {
                panic!("weights were already published; no fetch expected")
            })
        });

        thread::sleep(Duration::from_millis(50));
        fs::write(&dest, b"weights").unwrap();
        drop(guard);

        let path = caller.join().unwrap().unwrap();
        assert_eq!(path, dest);
    }
}
