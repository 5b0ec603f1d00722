//! Blocking JSON client for the REST backend.

use super::Remote;
use crate::error::{DeskError, Result};
use crate::model::{Entity, EntityKind, RecordId, SaleView, SelectOption};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("salesdesk/", env!("CARGO_PKG_VERSION"));
const ERROR_BODY_PREVIEW: usize = 200;

pub struct HttpRemote {
    http: Client,
    base_url: String,
}

impl HttpRemote {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DeskError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, kind: EntityKind, path: &str) -> String {
        resource_url(&self.base_url, kind, path)
    }

    /// Sends the request and maps transport failures and error statuses.
    fn send(&self, request: RequestBuilder, kind: EntityKind, id: Option<RecordId>) -> Result<Response> {
        let response = request
            .send()
            .map_err(|e| DeskError::RemoteUnavailable(e.to_string()))?;

        let status = response.status();
        debug!(resource = kind.resource(), %status, "response");
        if status.is_success() {
            return Ok(response);
        }

        let body: String = response
            .text()
            .unwrap_or_default()
            .chars()
            .take(ERROR_BODY_PREVIEW)
            .collect();
        Err(status_error(status, kind, id, &body))
    }

    fn read<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        response
            .json()
            .map_err(|e| DeskError::RemoteUnavailable(format!("Unreadable response: {}", e)))
    }
}

fn resource_url(base_url: &str, kind: EntityKind, path: &str) -> String {
    format!("{}/api/{}{}", base_url, kind.resource(), path)
}

/// Maps a non-success status onto the client error taxonomy.
fn status_error(status: StatusCode, kind: EntityKind, id: Option<RecordId>, body: &str) -> DeskError {
    let detail = if body.is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, body)
    };

    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => DeskError::not_found(kind, id),
        (s, _) if s.is_client_error() && s != StatusCode::NOT_FOUND => {
            DeskError::RemoteValidationRejected(detail)
        }
        _ => DeskError::RemoteUnavailable(detail),
    }
}

impl Remote for HttpRemote {
    fn list<E: Entity>(&self) -> Result<Vec<E>> {
        let url = self.url(E::KIND, "");
        debug!(%url, "GET");
        let response = self.send(self.http.get(&url), E::KIND, None)?;
        self.read(response)
    }

    fn get<E: Entity>(&self, id: RecordId) -> Result<E> {
        let url = self.url(E::KIND, &format!("/{}", id));
        debug!(%url, "GET");
        let response = self.send(self.http.get(&url), E::KIND, Some(id))?;
        self.read(response)
    }

    fn create<E: Entity>(&mut self, record: &E) -> Result<E> {
        let url = self.url(E::KIND, "");
        debug!(%url, "POST");
        let response = self.send(self.http.post(&url).json(record), E::KIND, None)?;
        self.read(response)
    }

    fn update<E: Entity>(&mut self, id: RecordId, record: &E) -> Result<()> {
        let url = self.url(E::KIND, &format!("/{}", id));
        debug!(%url, "PUT");
        self.send(self.http.put(&url).json(record), E::KIND, Some(id))?;
        Ok(())
    }

    fn delete<E: Entity>(&mut self, id: RecordId) -> Result<E> {
        let url = self.url(E::KIND, &format!("/{}", id));
        debug!(%url, "DELETE");
        let response = self.send(self.http.delete(&url), E::KIND, Some(id))?;
        self.read(response)
    }

    fn options(&self, kind: EntityKind) -> Result<Vec<SelectOption>> {
        let url = self.url(kind, "/options");
        debug!(%url, "GET");
        let response = self.send(self.http.get(&url), kind, None)?;
        self.read(response)
    }

    fn sales_view(&self) -> Result<Vec<SaleView>> {
        let url = self.url(EntityKind::Sales, "/view");
        debug!(%url, "GET");
        let response = self.send(self.http.get(&url), EntityKind::Sales, None)?;
        self.read(response)
    }
}
