//! Product photo attachment.

use serde::{Deserialize, Serialize};

pub const DEFAULT_FILE_NAME: &str = "photo.jpg";
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// A product photo: either already stored by the API or pending upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum Photo {
    /// Stored server-side; never re-uploaded on edit.
    Remote { url: String },
    /// Local file bytes to send as the `foto_produk` multipart part.
    Upload(PhotoUpload),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUpload {
    pub file_name: String,
    pub mime_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(file_name: Option<String>, mime_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
            mime_type: mime_type
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
            bytes,
        }
    }
}

impl Photo {
    /// Wrap a photo reference coming back from the API.
    pub fn from_reference(url: String) -> Self {
        Photo::Remote { url }
    }

    /// `true` when the reference points at an HTTP(S) resource.
    pub fn is_remote_reference(reference: &str) -> bool {
        reference.starts_with("http")
    }
}
