pub mod constants;
pub mod error;
pub mod form;
pub mod image_processor;
pub mod render;

use std::{future::Future, time::Duration};

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use url::Url;

pub use crate::{
    error::{Error, Result},
    form::{AnalysisForm, Submission},
    image_processor::{Preview, SelectedFile},
};
use crate::constants::*;

/// Anything the form can submit a selected file to.
pub trait Analyzer {
    fn analyze(&self, file: &SelectedFile) -> impl Future<Output = Result<Value>>;
}

// --- Client Implementation ---

pub struct PredictClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl PredictClient {
    /// `timeout` of `None` leaves reqwest's defaults in place.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    pub fn with_default_endpoint() -> Result<Self> {
        Self::new(Url::parse(DEFAULT_PREDICT_ENDPOINT)?, None)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn predict(&self, file: &SelectedFile) -> Result<Value> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)?;
        let form = Form::new().part(FILE_FIELD_NAME, part);

        log::debug!(
            "posting {} ({} bytes) to {}",
            file.name,
            file.size(),
            self.endpoint
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            return Err(Error::Status { status, body });
        }

        let resp_bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&resp_bytes)?)
    }
}

impl Analyzer for PredictClient {
    async fn analyze(&self, file: &SelectedFile) -> Result<Value> {
        self.predict(file).await
    }
}
