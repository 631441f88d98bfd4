//! Executes `HttpRequest` values over the network.

use tracing::debug;
use ureq::unversioned::multipart::{Form, Part};
use ureq::Agent;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::multipart::MultipartForm;

/// Listings embed every photo as base64, so bodies outgrow ureq's default cap.
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Something that can perform one HTTP round-trip.
///
/// Implementations must return non-2xx responses as `Ok`; only failures to
/// complete the exchange are errors.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status codes are data here, so ureq must not turn 4xx/5xx into Err.
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

/// Borrows each part into a ureq form; ureq picks the boundary and sets the
/// `Content-Type` header.
fn to_ureq_form(form: &MultipartForm) -> Result<Form<'_>, ApiError> {
    let mut out = Form::new();
    for part in form.parts() {
        let mut field = Part::bytes(&part.data);
        if let Some(file_name) = &part.file_name {
            field = field.file_name(file_name);
        }
        if let Some(content_type) = &part.content_type {
            field = field.mime_str(content_type)?;
        }
        out = out.part(&part.name, field);
    }
    Ok(out)
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let HttpRequest {
            method,
            url,
            headers,
            query,
            body,
        } = request;

        let mut response = match method {
            HttpMethod::Get | HttpMethod::Delete => {
                let mut builder = if method == HttpMethod::Get {
                    self.agent.get(&url)
                } else {
                    self.agent.delete(&url)
                };
                for (name, value) in &headers {
                    builder = builder.header(name, value);
                }
                for (name, value) in &query {
                    builder = builder.query(name, value);
                }
                builder.call()?
            }
            HttpMethod::Post | HttpMethod::Put => {
                let mut builder = if method == HttpMethod::Post {
                    self.agent.post(&url)
                } else {
                    self.agent.put(&url)
                };
                for (name, value) in &headers {
                    builder = builder.header(name, value);
                }
                for (name, value) in &query {
                    builder = builder.query(name, value);
                }
                match body {
                    RequestBody::Empty => builder.send_empty()?,
                    RequestBody::Form(pairs) => builder.send_form(pairs)?,
                    RequestBody::Multipart(form) => builder.send(to_ureq_form(&form)?)?,
                }
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_string()?;
        debug!(status, "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
