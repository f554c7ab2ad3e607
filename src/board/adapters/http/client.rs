//! Task store backed by the task REST API.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response};
use tracing::{debug, warn};

use super::config::{HttpStoreConfig, HttpStoreConfigError};
use super::wire::{CreateBody, ListEnvelope, TaskEnvelope, UpdateBody};
use crate::board::{
    domain::{NewTask, Task, TaskId, TaskPatch},
    ports::{StoreResponse, TaskStore, TaskStoreError, TaskStoreResult},
};

const TASKS: &str = "tasks";

/// HTTP task store that attaches the configured bearer token to every
/// request.
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    client: reqwest::Client,
    config: HttpStoreConfig,
}

impl HttpTaskStore {
    /// Builds a store client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpStoreConfigError::InvalidBearerToken`] when the token
    /// cannot be sent as a header, or
    /// [`HttpStoreConfigError::ClientBuild`] when the client fails to build.
    pub fn new(config: HttpStoreConfig) -> Result<Self, HttpStoreConfigError> {
        let mut builder = reqwest::Client::builder().default_headers(auth_headers(&config)?);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| HttpStoreConfigError::ClientBuild(err.to_string()))?;
        Ok(Self { client, config })
    }

    /// Returns the settings this store was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpStoreConfig {
        &self.config
    }

    async fn send(&self, request: RequestBuilder) -> TaskStoreResult<Response> {
        let response = request.send().await.map_err(TaskStoreError::transport)?;
        debug!(
            url = %response.url(),
            status = response.status().as_u16(),
            "task API replied"
        );
        Ok(response)
    }

    async fn send_without_payload(
        &self,
        request: RequestBuilder,
    ) -> TaskStoreResult<StoreResponse<()>> {
        let response = self.send(request).await?;
        let status = response.status().as_u16();
        if status == StoreResponse::<()>::OK {
            Ok(StoreResponse::ok(()))
        } else {
            Ok(StoreResponse::status_only(status))
        }
    }
}

/// Builds the default headers carrying the bearer credential.
pub(crate) fn auth_headers(config: &HttpStoreConfig) -> Result<HeaderMap, HttpStoreConfigError> {
    let mut headers = HeaderMap::new();
    if let Some(token) = config.bearer_token() {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| HttpStoreConfigError::InvalidBearerToken)?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

#[async_trait]
impl TaskStore for HttpTaskStore {
    async fn list(&self) -> TaskStoreResult<StoreResponse<Vec<Task>>> {
        let url = self.config.endpoint(&[TASKS]);
        let response = self.send(self.client.get(url)).await?;
        let status = response.status().as_u16();
        if status != StoreResponse::<Vec<Task>>::OK {
            return Ok(StoreResponse::status_only(status));
        }

        let envelope: ListEnvelope = response.json().await.map_err(TaskStoreError::decode)?;
        let tasks = envelope
            .data
            .into_iter()
            .map(super::wire::TaskRecord::into_task)
            .collect::<Result<Vec<_>, _>>()
            .map_err(TaskStoreError::decode)?;
        Ok(StoreResponse::ok(tasks))
    }

    async fn create(&self, new_task: &NewTask) -> TaskStoreResult<StoreResponse<Task>> {
        let url = self.config.endpoint(&[TASKS]);
        let body = CreateBody::from(new_task);
        let response = self.send(self.client.post(url).json(&body)).await?;
        let status = response.status().as_u16();
        if status != StoreResponse::<Task>::OK {
            return Ok(StoreResponse::status_only(status));
        }

        // The task exists server-side at this point; an unreadable body must
        // not turn the create into a failure.
        let created = match response.json::<TaskEnvelope>().await {
            Ok(envelope) => envelope.data.into_task().ok(),
            Err(err) => {
                warn!(error = %err, "create reply body was unreadable");
                None
            }
        };
        Ok(created.map_or_else(|| StoreResponse::status_only(status), StoreResponse::ok))
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> TaskStoreResult<StoreResponse<()>> {
        let url = self.config.endpoint(&[TASKS, id.as_str()]);
        let body = UpdateBody::from(patch);
        self.send_without_payload(self.client.put(url).json(&body)).await
    }

    async fn delete(&self, id: &TaskId) -> TaskStoreResult<StoreResponse<()>> {
        let url = self.config.endpoint(&[TASKS, id.as_str()]);
        self.send_without_payload(self.client.delete(url)).await
    }
}
