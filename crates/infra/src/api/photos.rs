//! Photo gallery endpoints: upload, list, delete.

use std::sync::Arc;

use rishta_domain::{ActionError, Envelope, PhotoFile};
use rishta_core::{Notifier, ToastKind};
use serde_json::Value;

use super::client::{ApiClient, MultipartForm, RequestOptions};

const UPLOAD: &str = "photos/upload";
const MY_PHOTOS: &str = "photos/my-photos";
const BY_ID: &str = "photos/";

pub struct PhotosApi {
    client: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
}

impl PhotosApi {
    #[must_use]
    pub fn new(client: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    /// Upload one photo, optionally flagging it as the profile photo.
    ///
    /// # Errors
    /// Rejected on a `success: false` answer, `Failed` on transport or
    /// HTTP-level errors; one notification either way.
    pub async fn upload(
        &self,
        photo: PhotoFile,
        is_profile_photo: bool,
    ) -> Result<Value, ActionError> {
        let form = MultipartForm::new()
            .file("photo", photo)
            .text("isProfilePhoto", is_profile_photo.to_string());

        let envelope: Envelope<Value> = self
            .client
            .post_multipart(UPLOAD, form, &RequestOptions::logged())
            .await
            .map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        if envelope.success {
            self.notifier
                .notify(ToastKind::Success, envelope.message_or("Photo uploaded successfully"));
            Ok(envelope.data.unwrap_or(Value::Null))
        } else {
            let message = envelope.message_or("Failed to upload photo").to_owned();
            self.notifier.notify(ToastKind::Error, &message);
            Err(ActionError::Rejected(message))
        }
    }

    /// List the caller's own photos.
    ///
    /// # Errors
    /// Same split as [`PhotosApi::upload`].
    pub async fn my_photos(&self) -> Result<Vec<Value>, ActionError> {
        self.fetch_list(MY_PHOTOS).await
    }

    /// List another member's photos.
    ///
    /// # Errors
    /// Same split as [`PhotosApi::upload`].
    pub async fn user_photos(&self, user_id: &str) -> Result<Vec<Value>, ActionError> {
        self.fetch_list(&format!("{BY_ID}{user_id}")).await
    }

    /// Delete a photo by id.
    ///
    /// # Errors
    /// Same split as [`PhotosApi::upload`].
    pub async fn delete(&self, photo_id: &str) -> Result<(), ActionError> {
        let envelope: Envelope<Value> = self
            .client
            .delete(&format!("{BY_ID}{photo_id}"), &RequestOptions::logged())
            .await
            .map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        if envelope.success {
            self.notifier
                .notify(ToastKind::Success, envelope.message_or("Photo deleted successfully"));
            Ok(())
        } else {
            let message = envelope.message_or("Failed to delete photo").to_owned();
            self.notifier.notify(ToastKind::Error, &message);
            Err(ActionError::Rejected(message))
        }
    }

    async fn fetch_list(&self, path: &str) -> Result<Vec<Value>, ActionError> {
        let envelope: Envelope<Vec<Value>> =
            self.client.get(path, &RequestOptions::logged()).await.map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        if envelope.success {
            Ok(envelope.data.unwrap_or_default())
        } else {
            let message = envelope.message_or("Failed to load photos").to_owned();
            self.notifier.notify(ToastKind::Error, &message);
            Err(ActionError::Rejected(message))
        }
    }
}
