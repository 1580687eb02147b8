use axum::http::header;
use serde::de::DeserializeOwned;

use super::persister::{Persister, PersisterFormat};
use super::wrapper::{HttpInputMessage, RestInputWrapper};
use crate::error::{AppError, AppResult};

/// Reads request bodies through a [`Persister`] configured by the controller
#[derive(Debug, Clone, Copy)]
pub struct PersisterMessageConverter {
    format: PersisterFormat,
}

impl PersisterMessageConverter {
    pub fn new(format: PersisterFormat) -> Self {
        Self { format }
    }

    /// Pick the converter matching the message's `Content-Type`
    pub fn for_message(message: &impl HttpInputMessage) -> AppResult<Self> {
        let content_type = message
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::UnsupportedMediaType("missing Content-Type".to_string()))?;

        PersisterFormat::from_content_type(content_type)
            .map(Self::new)
            .ok_or_else(|| AppError::UnsupportedMediaType(content_type.to_string()))
    }

    pub fn format(&self) -> PersisterFormat {
        self.format
    }

    pub fn read<T, M>(&self, input: &RestInputWrapper<'_, M>) -> AppResult<T>
    where
        T: DeserializeOwned,
        M: HttpInputMessage,
    {
        let mut persister = Persister::new(self.format);
        input.configure_persister(&mut persister, self);

        let body = input.body()?;
        tracing::debug!(
            "Reading {} byte {} body (root alias: {:?})",
            body.len(),
            self.format,
            persister.root_alias()
        );
        persister.load(&body)
    }
}
