use std::{path::Path, time::Duration};

use reqwest::{Client, header::CONTENT_TYPE};

use crate::{utils, warning};

/// Used when neither the content type nor the URL yields an extension.
const DEFAULT_EXTENSION: &str = ".jpg";

/// Short timeout for the metadata-only probe; the image itself gets longer.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads an image and saves it as `{covers_dir}/{base_filename}{ext}`,
/// returning the path of the saved file.
///
/// The extension is determined by a lightweight HEAD request inspecting the
/// declared content type, falling back to the URL's own suffix and finally
/// to `.jpg`. If a file already exists at the target path it is treated as
/// already downloaded and returned without re-fetching - which also means a
/// stale file from a prior failed or different download under the same name
/// is silently reused.
///
/// Any network failure, non-success status or I/O failure yields `None` with
/// a warning; a missing cover is never a hard failure.
pub async fn download_and_save(
    client: &Client,
    covers_dir: &Path,
    url: &str,
    base_filename: &str,
) -> Option<String> {
    let extension = probe_extension(client, url)
        .await
        .or_else(|| utils::extension_from_url(url))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    let target = covers_dir.join(format!("{}{}", base_filename, extension));
    if async_fs::metadata(&target).await.is_ok() {
        // Already downloaded under this name
        return Some(target.to_string_lossy().into_owned());
    }

    let response = match client.get(url).timeout(DOWNLOAD_TIMEOUT).send().await {
        Ok(resp) => match resp.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warning!("Cover download failed for {}: {}", url, e);
                return None;
            }
        },
        Err(e) => {
            warning!("Cover download failed for {}: {}", url, e);
            return None;
        }
    };

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warning!("Cover download failed for {}: {}", url, e);
            return None;
        }
    };

    if let Err(e) = async_fs::create_dir_all(covers_dir).await {
        warning!("Cannot create covers directory: {}", e);
        return None;
    }
    if let Err(e) = async_fs::write(&target, &bytes).await {
        warning!("Cannot write cover file {}: {}", target.display(), e);
        return None;
    }

    Some(target.to_string_lossy().into_owned())
}

/// Issues a metadata-only request and maps the declared content type to a
/// file extension. Any failure falls through to the URL-suffix fallback.
async fn probe_extension(client: &Client, url: &str) -> Option<String> {
    let response = client
        .head(url)
        .timeout(PROBE_TIMEOUT)
        .send()
        .await
        .ok()?
        .error_for_status()
        .ok()?;

    let content_type = response.headers().get(CONTENT_TYPE)?.to_str().ok()?;
    utils::extension_from_content_type(content_type).map(str::to_string)
}
