//! Submitting a prediction and following the server's answer.
//!
//! [`Predictor::predict`] sends `{"prediction": <value>}` to `/predict/`
//! and, on a 200, replaces the current location with the reply's `new_url`.
//! The call resolves once, when the exchange is over; failures are logged
//! and handed back, never retried.

mod error;

pub use error::PredictError;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::consts::PREDICT_PATH;
use crate::navigator::Navigator;
use crate::prediction::Prediction;
use crate::transport::{Request, Transport};

/// What the server sends back for an accepted prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictReply {
    /// Where to go next.
    pub new_url: String,
    /// Index of the next image, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_index: Option<u64>,
    /// The prediction as the server understood it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Value>,
    /// Anything else in the reply. Kept for logging only.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PredictReply {
    /// Parse a reply body. Only `new_url` is required.
    pub fn parse(body: &str) -> Result<Self, PredictError> {
        serde_json::from_str(body).map_err(|e| PredictError::Malformed(e.to_string()))
    }
}

/// Sends predictions through a [`Transport`] and follows the answer with a
/// [`Navigator`].
pub struct Predictor {
    transport: Arc<dyn Transport>,
    navigator: Arc<dyn Navigator>,
}

impl Predictor {
    pub fn new(transport: Arc<dyn Transport>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            transport,
            navigator,
        }
    }

    /// One exchange with the server. Does not navigate.
    pub async fn invoke(&self, prediction: &Prediction) -> Result<PredictReply, PredictError> {
        let request = Request::post_json(PREDICT_PATH, prediction.body());
        debug!(%prediction, path = PREDICT_PATH, "submitting prediction");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| PredictError::Network(format!("{e:#}")))?;

        if response.status != 200 {
            return Err(PredictError::Status {
                status: response.status,
                reason: response.reason,
            });
        }

        PredictReply::parse(&response.body)
    }

    /// Submit `prediction` and, if the server accepts it, replace the current
    /// location with the one it names.
    pub async fn predict(&self, prediction: &Prediction) -> Result<PredictReply, PredictError> {
        let result = self.follow(prediction).await;
        if let Err(e) = &result {
            match e.status_text() {
                Some(reason) => error!(status = reason, "prediction rejected"),
                None => error!(error = %e, "prediction failed"),
            }
        }
        result
    }

    async fn follow(&self, prediction: &Prediction) -> Result<PredictReply, PredictError> {
        let reply = self.invoke(prediction).await?;
        info!(reply = ?reply, "prediction accepted");
        self.navigator
            .replace(&reply.new_url)
            .await
            .map_err(|e| PredictError::Navigation(format!("{e:#}")))?;
        Ok(reply)
    }
}
