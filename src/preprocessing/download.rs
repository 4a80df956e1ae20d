use std::path::{Path, PathBuf};

use tokio::fs;
use url::Url;

/// Download `filename` from `base_url` into `dir`, unless it is already there.
///
/// Returns the local path of the file.
pub async fn maybe_download(base_url: &Url, filename: &str, dir: &Path) -> anyhow::Result<PathBuf> {
    let path = dir.join(filename);

    if fs::try_exists(&path).await? {
        log::debug!("{} already exists, skipping download", path.display());

        return Ok(path);
    }

    fs::create_dir_all(dir).await?;

    let url = base_url
        .join(filename)
        .map_err(|e| anyhow!("Invalid download URL for {}: {}", filename, e))?;

    log::info!("Downloading {} to {}", url, path.display());

    let response = reqwest::get(url.clone())
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| anyhow!("Failed to download {}: {}", url, e))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| anyhow!("Failed to read the body of {}: {}", url, e))?;

    fs::write(&path, &bytes).await?;

    log::info!("Downloaded {} ({} bytes)", filename, bytes.len());

    Ok(path)
}
