//! Blocking HTTP client for the form service.

use schema_form::{
    FormDefinition, FormId, SchemaLoadError, SchemaStore, SubmissionError, SubmissionPayload,
    SubmissionSink,
};
use tracing::{debug, info};
use ureq::Agent;

use crate::config::{ClientConfig, ConfigError};
use crate::response::{read_schema_response, read_submission_response};

/// Schema store and submission sink backed by the REST endpoints.
///
/// Non-2xx responses are read like any other so that the service's own
/// `message` can be surfaced.
#[derive(Debug, Clone)]
pub struct HttpFormClient {
    config: ClientConfig,
    agent: Agent,
}

impl HttpFormClient {
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout()))
            .build()
            .into();
        Ok(Self { config, agent })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn form_url(&self, form_id: &FormId) -> String {
        format!(
            "{}/forms/{}",
            self.config.base_url,
            urlencoding::encode(form_id.as_str())
        )
    }

    pub fn submission_url(&self) -> String {
        format!("{}/form-submissions", self.config.base_url)
    }

    fn authorization(&self) -> Option<String> {
        self.config.credential.as_ref().map(|c| c.bearer())
    }
}

impl SchemaStore for HttpFormClient {
    fn fetch_form(&self, form_id: &FormId) -> Result<FormDefinition, SchemaLoadError> {
        let url = self.form_url(form_id);
        debug!(url = %url, "fetching form");

        let mut request = self.agent.get(&url).header("Accept", "application/json");
        if let Some(auth) = self.authorization() {
            request = request.header("Authorization", &auth);
        }
        let mut response = request.call().map_err(SchemaLoadError::unreachable)?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(SchemaLoadError::unreachable)?;
        let definition = read_schema_response(status, &body)?;
        info!(form = %form_id, fields = definition.len(), "form fetched");
        Ok(definition)
    }
}

impl SubmissionSink for HttpFormClient {
    fn submit(&self, payload: &SubmissionPayload) -> Result<(), SubmissionError> {
        let url = self.submission_url();
        debug!(url = %url, form = %payload.form_id, "posting submission");

        let mut request = self.agent.post(&url).header("Accept", "application/json");
        if let Some(auth) = self.authorization() {
            request = request.header("Authorization", &auth);
        }
        let mut response = request
            .send_json(payload)
            .map_err(SubmissionError::unreachable)?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(SubmissionError::unreachable)?;
        read_submission_response(status, &body)
    }
}
