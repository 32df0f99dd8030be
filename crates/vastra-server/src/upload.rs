//! Multipart form reading for the image upload routes.

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::{AppError, AppResult};

/// One submitted form: the `file` part plus any text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<Vec<u8>>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = UploadForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == "file" {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
                form.file = Some(bytes.to_vec());
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read field {}: {}", name, e)))?;
                form.fields.insert(name, text);
            }
        }
        Ok(form)
    }

    /// The uploaded file; missing or empty is a 400 with `message`.
    pub fn require_file(&mut self, message: &str) -> AppResult<Vec<u8>> {
        self.file
            .take()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| AppError::BadRequest(message.to_string()))
    }

    pub fn field_or(&self, name: &str, default: &str) -> String {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    }
}
