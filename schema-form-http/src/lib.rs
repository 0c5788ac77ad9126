//! # schema-form-http
//!
//! The REST collaborators of a `FormEngine`: a schema store answering
//! `GET {base}/forms/{id}` and a submission sink accepting
//! `POST {base}/form-submissions`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use schema_form::FormEngine;
//! use schema_form_http::{ClientConfig, HttpFormClient};
//!
//! let config = ClientConfig::new("https://forms.example.org/api")
//!     .with_timeout_secs(10)
//!     .with_credential("s3cret");
//! let client = HttpFormClient::new(config)?;
//!
//! let mut engine = FormEngine::new();
//! engine.load(&client, "patient-intake")?;
//! ```

mod client;
mod config;
mod response;

pub use client::HttpFormClient;
pub use config::{ClientConfig, ConfigError, Credential, DEFAULT_TIMEOUT_SECS};
pub use response::{read_schema_response, read_submission_response};
