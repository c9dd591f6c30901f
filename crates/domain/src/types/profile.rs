//! Registration and upload input shapes.

use serde::{Deserialize, Serialize};

/// A photo ready for multipart upload.
///
/// The mobile client passed `{uri, type, name}` descriptors; here the
/// content is carried as bytes with the same name/mime metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl PhotoFile {
    #[must_use]
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self { bytes, file_name: file_name.into(), mime_type: mime_type.into() }
    }

    /// Jpeg photo with the default name, matching the client's fallback
    /// for pictures that arrive without metadata.
    #[must_use]
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self::new(bytes, "photo.jpg", "image/jpeg")
    }
}

/// Everything the registration form collects.
///
/// `phone` is the local 10-digit number; the country code prefix is
/// applied when the payload is built, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub email: String,
    pub phone: String,
    pub password: String,
    pub full_name: String,
    pub age: String,
    pub date_of_birth: String,
    pub gender: String,
    pub city: String,
    pub occupation: String,
    pub current_state: String,
    #[serde(skip)]
    pub photos: Vec<PhotoFile>,
}
