//! Download of the source spreadsheet into the local staging directory.

use anyhow::{Context, Result};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};
use url::Url;

/// A downloaded file in the staging directory. The file is removed when the
/// handle is dropped, so extraction failures cannot leak staged files.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            warn!("failed to delete {}: {}", self.path.display(), err);
        } else {
            info!("deleted staged file {}", self.path.display());
        }
    }
}

/// Download the given URL and save it under `dest_dir` using the URL's final
/// path segment as the filename. Failures are logged here and surface as
/// `None`; the caller only decides whether to continue.
///
/// `verify_certificates` configures TLS trust for this one download only.
/// The source site has served misconfigured certificate chains, so the
/// production caller passes `false` and accepts any server identity.
pub async fn download_file(
    url_str: &str,
    dest_dir: impl AsRef<Path>,
    verify_certificates: bool,
) -> Option<StagedFile> {
    match download(url_str, dest_dir.as_ref(), verify_certificates).await {
        Ok(staged) => {
            info!("{} file got downloaded", staged.path().display());
            Some(staged)
        }
        Err(err) => {
            error!("error occurred during file download: {err:#}");
            None
        }
    }
}

async fn download(
    url_str: &str,
    dest_dir: &Path,
    verify_certificates: bool,
) -> Result<StagedFile> {
    let url = Url::parse(url_str).with_context(|| format!("invalid URL: {url_str}"))?;
    let filename = url
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .unwrap_or("download.bin");
    let dest_path = dest_dir.join(filename);

    fs::create_dir_all(dest_dir)
        .await
        .with_context(|| format!("failed to create staging dir {}", dest_dir.display()))?;

    // The client lives for this single call; trust is never process-global.
    let client = Client::builder()
        .danger_accept_invalid_certs(!verify_certificates)
        .build()
        .context("failed to build HTTP client")?;

    let resp = client.get(url.as_str()).send().await?.error_for_status()?;
    let bytes = resp.bytes().await?;
    fs::write(&dest_path, &bytes)
        .await
        .with_context(|| format!("failed to write {}", dest_path.display()))?;

    Ok(StagedFile { path: dest_path })
}
