// server/src/uploads.rs

//! Local persistence of product images.
//!
//! Files land in the configured upload directory and the stored product
//! `image` value is `uploads/<file name>`, which is also the URL path the
//! static file service answers on.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::errors::AppError;

/// URL prefix (and stored path prefix) for served images.
pub const PUBLIC_PREFIX: &str = "uploads";

const FORM_FIELD: &str = "image";

#[derive(Debug, Clone)]
pub struct ImageStore {
  dir: PathBuf,
  max_bytes: usize,
}

/// Extension of the client's file name, restricted to a short alphanumeric suffix.
fn safe_extension(original_name: Option<&str>) -> Option<String> {
  let ext = Path::new(original_name?).extension()?.to_str()?;
  let valid = !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric());
  valid.then(|| ext.to_ascii_lowercase())
}

impl ImageStore {
  pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
    ImageStore { dir: dir.into(), max_bytes }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  pub fn max_bytes(&self) -> usize {
    self.max_bytes
  }

  pub async fn ensure_dir(&self) -> Result<(), AppError> {
    tokio::fs::create_dir_all(&self.dir).await?;
    Ok(())
  }

  /// Builds a fresh, collision-free file name: `image-<millis>-<short uuid>.<ext>`.
  fn file_name_for(original_name: Option<&str>) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let nonce = uuid::Uuid::new_v4().simple().to_string();
    let stem = format!("{}-{}-{}", FORM_FIELD, millis, &nonce[..8]);
    match safe_extension(original_name) {
      Some(ext) => format!("{}.{}", stem, ext),
      None => stem,
    }
  }

  /// Writes the bytes and returns the path to store on the product.
  #[instrument(name = "uploads::save", skip(self, bytes), fields(size = bytes.len()))]
  pub async fn save(&self, original_name: Option<&str>, bytes: &[u8]) -> Result<String, AppError> {
    if bytes.is_empty() {
      return Err(AppError::Validation("Uploaded image is empty".to_string()));
    }
    self.ensure_dir().await?;
    let file_name = Self::file_name_for(original_name);
    tokio::fs::write(self.dir.join(&file_name), bytes).await?;
    let stored = format!("{}/{}", PUBLIC_PREFIX, file_name);
    info!(%stored, "Image stored.");
    Ok(stored)
  }

  /// Maps a stored `image` value back onto a file inside the upload directory.
  ///
  /// Only the final path component is used, so a stored value can never
  /// address a file outside the directory.
  pub fn resolve(&self, stored: &str) -> Option<PathBuf> {
    let name = Path::new(stored).file_name()?;
    Some(self.dir.join(name))
  }

  /// Best-effort delete. A missing file is fine; other failures are only logged.
  #[instrument(name = "uploads::remove", skip(self))]
  pub async fn remove(&self, stored: &str) {
    let Some(path) = self.resolve(stored) else {
      debug!("Nothing to remove for stored image value.");
      return;
    };
    match tokio::fs::remove_file(&path).await {
      Ok(()) => info!(path = %path.display(), "Image file removed."),
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!(path = %path.display(), "Image file already absent.");
      }
      Err(e) => warn!(path = %path.display(), error = %e, "Could not remove image file."),
    }
  }
}
