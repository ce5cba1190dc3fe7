use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use blueprints_core::model::require_non_blank;
use blueprints_core::{validate_update, Blueprint, BlueprintError, BlueprintSource};

const BASE_PATH: &str = "blueprints";
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a remote blueprint service.
#[derive(Clone, Debug)]
pub struct RemoteConfig {
    /// Service root, e.g. `http://localhost:8080`. The `/blueprints` collection
    /// path is appended by the client.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Which contract operation a request belongs to. Drives status translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operation {
    FetchAll,
    FetchByAuthor,
    FetchOne,
    Create,
    Update,
}

impl Operation {
    fn label(self) -> &'static str {
        match self {
            Self::FetchAll => "fetch_all",
            Self::FetchByAuthor => "fetch_by_author",
            Self::FetchOne => "fetch_by_author_and_name",
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

/// Translate a non-success status into the error taxonomy.
/// Only 404 on keyed reads/updates and 409 on create carry meaning;
/// everything else is a service failure.
fn classify(op: Operation, status: StatusCode, subject: &str, body: &str) -> BlueprintError {
    match (op, status) {
        (Operation::FetchByAuthor, StatusCode::NOT_FOUND) => BlueprintError::author_not_found(subject),
        (Operation::FetchOne | Operation::Update, StatusCode::NOT_FOUND) => {
            BlueprintError::NotFound(format!("blueprint not found: {subject}"))
        }
        (Operation::Create, StatusCode::CONFLICT) => {
            BlueprintError::Conflict(format!("blueprint already exists: {subject}"))
        }
        _ => BlueprintError::ServiceUnavailable(format!(
            "{} {subject} failed with status {status}: {body}",
            op.label()
        )),
    }
}

/// Blueprint source backed by the `/blueprints` HTTP API.
pub struct RemoteSource {
    client: Client,
    base: Url,
}

impl RemoteSource {
    pub fn new(config: RemoteConfig) -> Result<Self, BlueprintError> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            BlueprintError::Validation(format!("invalid service url {}: {e}", config.base_url))
        })?;
        if base.cannot_be_a_base() {
            return Err(BlueprintError::Validation(format!(
                "service url {} cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BlueprintError::ServiceUnavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/blueprints/{segments...}`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Cannot-be-a-base urls are rejected in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(BASE_PATH).extend(segments);
        }
        url
    }

    async fn send(
        &self,
        op: Operation,
        subject: &str,
        req: RequestBuilder,
    ) -> Result<Response, BlueprintError> {
        let resp = req.send().await.map_err(|e| {
            warn!(op = op.label(), subject, error = %e, "remote source transport failure");
            let reason = if e.is_timeout() { "timed out" } else { "transport failure" };
            BlueprintError::ServiceUnavailable(format!("{} {subject} {reason}: {e}", op.label()))
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            debug!(op = op.label(), subject, %status, "remote source request rejected");
            return Err(classify(op, status, subject, &body));
        }
        Ok(resp)
    }

    async fn decode<T: DeserializeOwned>(op: Operation, subject: &str, resp: Response) -> Result<T, BlueprintError> {
        resp.json::<T>().await.map_err(|e| {
            BlueprintError::ServiceUnavailable(format!("malformed {} response for {subject}: {e}", op.label()))
        })
    }

    /// Writes may answer with an empty body; the submitted record is then
    /// the stored form.
    async fn decode_or_echo(
        op: Operation,
        subject: &str,
        resp: Response,
        submitted: Blueprint,
    ) -> Result<Blueprint, BlueprintError> {
        let body = resp.bytes().await.map_err(|e| {
            BlueprintError::ServiceUnavailable(format!("{} {subject}: failed to read body: {e}", op.label()))
        })?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(submitted);
        }
        serde_json::from_slice(&body).map_err(|e| {
            BlueprintError::ServiceUnavailable(format!("malformed {} response for {subject}: {e}", op.label()))
        })
    }
}

#[async_trait]
impl BlueprintSource for RemoteSource {
    fn name(&self) -> &str {
        "remote"
    }

    #[instrument(skip(self), fields(base = %self.base))]
    async fn fetch_all(&self) -> Result<Vec<Blueprint>, BlueprintError> {
        let op = Operation::FetchAll;
        let resp = self.send(op, "*", self.client.get(self.endpoint(&[]))).await?;
        Self::decode(op, "*", resp).await
    }

    #[instrument(skip(self), fields(base = %self.base))]
    async fn fetch_by_author(&self, author: &str) -> Result<Vec<Blueprint>, BlueprintError> {
        require_non_blank("author", author)?;
        let op = Operation::FetchByAuthor;
        let resp = self
            .send(op, author, self.client.get(self.endpoint(&[author])))
            .await?;
        let blueprints: Vec<Blueprint> = Self::decode(op, author, resp).await?;
        debug!(count = blueprints.len(), "remote lookup by author");
        Ok(blueprints)
    }

    #[instrument(skip(self), fields(base = %self.base))]
    async fn fetch_by_author_and_name(
        &self,
        author: &str,
        name: &str,
    ) -> Result<Blueprint, BlueprintError> {
        require_non_blank("author", author)?;
        require_non_blank("name", name)?;
        let op = Operation::FetchOne;
        let subject = format!("{author}/{name}");
        let resp = self
            .send(op, &subject, self.client.get(self.endpoint(&[author, name])))
            .await?;
        Self::decode(op, &subject, resp).await
    }

    #[instrument(skip(self, blueprint), fields(base = %self.base, key = %blueprint.key()))]
    async fn create(&self, blueprint: Blueprint) -> Result<Blueprint, BlueprintError> {
        blueprint.validate()?;
        let op = Operation::Create;
        let subject = blueprint.key().to_string();
        let req = self.client.post(self.endpoint(&[])).json(&blueprint);
        let resp = self.send(op, &subject, req).await?;
        Self::decode_or_echo(op, &subject, resp, blueprint).await
    }

    #[instrument(skip(self, blueprint), fields(base = %self.base))]
    async fn update(
        &self,
        author: &str,
        name: &str,
        blueprint: Blueprint,
    ) -> Result<Blueprint, BlueprintError> {
        validate_update(author, name, &blueprint)?;
        let op = Operation::Update;
        let subject = format!("{author}/{name}");
        let req = self.client.put(self.endpoint(&[author, name])).json(&blueprint);
        let resp = self.send(op, &subject, req).await?;
        Self::decode_or_echo(op, &subject, resp, blueprint).await
    }
}
