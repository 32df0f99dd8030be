//! Hugging Face inference client for Stable Diffusion XL.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::{info, warn};

use vastra_core::{Error, Result};
use vastra_vision::to_png_data_url;

pub const SDXL_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-xl-base-1.0";

const IMAGE_SIZE: u32 = 1024;
const INFERENCE_STEPS: u32 = 40;
const GUIDANCE_SCALE: f64 = 7.5;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);
/// How long to let a cold model load before the single retry.
const COLD_START_WAIT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct SdxlClient {
    client: Client,
    token: String,
    model_url: String,
    cold_start_wait: Duration,
}

impl SdxlClient {
    pub fn new(client: Client, token: impl Into<String>) -> Self {
        Self::with_model_url(client, token, SDXL_MODEL_URL)
    }

    pub fn with_model_url(client: Client, token: impl Into<String>, model_url: &str) -> Self {
        Self {
            client,
            token: token.into(),
            model_url: model_url.to_string(),
            cold_start_wait: COLD_START_WAIT,
        }
    }

    pub fn with_cold_start_wait(mut self, wait: Duration) -> Self {
        self.cold_start_wait = wait;
        self
    }

    async fn post(&self, prompt: &str) -> Result<reqwest::Response> {
        let payload = json!({
            "inputs": prompt,
            "parameters": {
                "width": IMAGE_SIZE,
                "height": IMAGE_SIZE,
                "num_inference_steps": INFERENCE_STEPS,
                "guidance_scale": GUIDANCE_SCALE,
            }
        });
        self.client
            .post(&self.model_url)
            .bearer_auth(&self.token)
            .timeout(REQUEST_TIMEOUT)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))
    }

    /// Render `prompt` and return the raw image bytes.
    ///
    /// A 503 means the model is still loading; it is retried once after a
    /// short wait. Any other non-200 answer is an upstream error.
    pub async fn generate(&self, prompt: &str) -> Result<Vec<u8>> {
        info!("Generating image with SDXL");
        let mut response = self.post(prompt).await?;
        if response.status() == StatusCode::SERVICE_UNAVAILABLE {
            warn!("SDXL model loading, retrying in {:?}", self.cold_start_wait);
            tokio::time::sleep(self.cold_start_wait).await;
            response = self.post(prompt).await?;
        }

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!("SDXL returned {}: {}", status, body)));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// Render `prompt` as a PNG data URL.
    pub async fn generate_data_url(&self, prompt: &str) -> Result<String> {
        let bytes = self.generate(prompt).await?;
        let img = vastra_vision::decode_image(&bytes)?;
        to_png_data_url(&img)
    }
}
