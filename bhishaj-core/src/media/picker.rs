//! Media picker trait and a filesystem-backed implementation

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use crate::chat::types::{Attachment, AttachmentKind};
use crate::utils::extension_of;
use crate::{Error, Result};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "heic", "bmp"];

/// What the user asked to pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaRequest {
    Images,
    Documents,
    Camera,
}

/// Result of a pick that did not fail outright
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// One or more attachments were selected
    Picked(Vec<Attachment>),
    /// The user backed out
    Cancelled,
    /// The platform refused access; the reason is shown to the user
    Denied(String),
}

/// Source of attachments for the composer
#[async_trait]
pub trait MediaPicker: Send + Sync {
    async fn pick(&self, request: MediaRequest) -> Result<PickOutcome>;
}

/// Picks local files given on the command line
///
/// There is no camera on a terminal, so camera requests are denied.
#[derive(Debug, Clone, Default)]
pub struct FsMediaPicker {
    selection: Vec<PathBuf>,
}

impl FsMediaPicker {
    /// Picker whose next pick returns `paths` (empty means cancelled)
    pub fn new(selection: Vec<PathBuf>) -> Self {
        Self { selection }
    }
}

/// Whether a file name looks like an image
pub fn is_image_name(name: &str) -> bool {
    extension_of(name).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

#[async_trait]
impl MediaPicker for FsMediaPicker {
    async fn pick(&self, request: MediaRequest) -> Result<PickOutcome> {
        if request == MediaRequest::Camera {
            return Ok(PickOutcome::Denied(
                "camera access is not available here".to_string(),
            ));
        }
        if self.selection.is_empty() {
            return Ok(PickOutcome::Cancelled);
        }

        let mut attachments = Vec::with_capacity(self.selection.len());
        for path in &self.selection {
            let metadata = tokio::fs::metadata(path)
                .await
                .map_err(|e| Error::Media(format!("cannot read {}: {}", path.display(), e)))?;
            if !metadata.is_file() {
                return Err(Error::Media(format!("{} is not a file", path.display())));
            }

            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();

            let kind = match request {
                MediaRequest::Images if is_image_name(&name) => AttachmentKind::Image,
                MediaRequest::Images => {
                    return Err(Error::Media(format!("{} is not an image", name)));
                }
                _ => AttachmentKind::Document,
            };

            let absolute = tokio::fs::canonicalize(path).await?;
            let uri = format!("file://{}", absolute.display());
            debug!("Picked {} as {}", uri, kind);
            attachments.push(Attachment::new(name, kind, uri));
        }

        Ok(PickOutcome::Picked(attachments))
    }
}
