use crate::errors::SurveyError;
use crate::models::{Answer, Summary};
use reqwest::{Client, Response};
use tracing::debug;

/// The remote answer collection service.
#[allow(async_fn_in_trait)]
pub trait SurveyApi {
    async fn submit(&self, answer: Answer) -> Result<(), SurveyError>;

    async fn summary(&self) -> Result<Summary, SurveyError>;
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    endpoint: String,
}

impl HttpApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl SurveyApi for HttpApi {
    async fn submit(&self, answer: Answer) -> Result<(), SurveyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&bool::from(answer))
            .send()
            .await?;
        ensure_ok(response).await?;
        debug!(%answer, "answer submitted");
        Ok(())
    }

    async fn summary(&self) -> Result<Summary, SurveyError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let response = ensure_ok(response).await?;
        Ok(response.json().await?)
    }
}

/// Turns a non-OK response into an error carrying the body text.
async fn ensure_ok(response: Response) -> Result<Response, SurveyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SurveyError::rejected(status, body))
}
