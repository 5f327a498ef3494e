//! Blocking client for the three Passwork endpoints the picker needs.

use std::fmt;
use std::time::Duration;

use log::*;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{ApiFailure, Error, Result};
use crate::model::passwork::{Envelope, LoginData, PasswordDetail, SearchHit, SearchRequest};

const TIMEOUT: Duration = Duration::from_secs(15);
const AUTH_HEADER: &str = "Passwork-Auth";
// Longest chunk of an error body worth repeating to the user
const ERROR_BODY_LIMIT: usize = 4096;

/// Read access to the vault for one authenticated session.
pub trait Vault {
    fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
    fn get_password(&self, id: &str) -> Result<PasswordDetail>;
}

#[derive(Debug, Clone)]
pub struct PassworkClient {
    http: Client,
    base_url: String,
}

impl PassworkClient {
    pub fn new(base_url: &str) -> Result<PassworkClient> {
        let http = Client::builder()
            .user_agent(format!("pwfz/{}", env!("CARGO_PKG_VERSION")))
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(PassworkClient {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Trades the API key for a session token.
    pub fn login(&self, api_key: &str) -> Result<Session<'_>> {
        if api_key.is_empty() {
            return Err(Error::Config("PASSWORK_API_KEY is not set".to_owned()));
        }
        debug!("Logging in to {}", self.base_url);
        let request = self
            .http
            .post(format!("{}/auth/login/{}", self.base_url, api_key));
        let data: LoginData = call(request)
            .and_then(|data| data.ok_or(ApiFailure::MissingData))
            .map_err(Error::Auth)?;
        if data.token.is_empty() {
            return Err(Error::Auth(ApiFailure::MissingToken));
        }
        Ok(Session {
            client: self,
            token: data.token,
        })
    }
}

/// A logged in client. The token lives only as long as this value.
pub struct Session<'a> {
    client: &'a PassworkClient,
    token: String,
}

impl Session<'_> {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.client.base_url, path)
    }
}

impl Vault for Session<'_> {
    fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        debug!("Searching for {:?}", query);
        let request = self
            .client
            .http
            .post(self.url("/passwords/search"))
            .header(AUTH_HEADER, &self.token)
            .json(&SearchRequest { query });
        let hits: Option<Vec<SearchHit>> = call(request).map_err(Error::Search)?;
        Ok(hits.unwrap_or_default())
    }

    fn get_password(&self, id: &str) -> Result<PasswordDetail> {
        debug!("Fetching password {}", id);
        let request = self
            .client
            .http
            .get(self.url(&format!("/passwords/{}", id)))
            .header(AUTH_HEADER, &self.token);
        call(request)
            .and_then(|data| data.ok_or(ApiFailure::MissingData))
            .map_err(|cause| Error::Fetch {
                id: id.to_owned(),
                cause,
            })
    }
}

impl fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("client", &self.client)
            .field("token", &"<redacted>")
            .finish()
    }
}

fn call<T: DeserializeOwned>(request: RequestBuilder) -> std::result::Result<Option<T>, ApiFailure> {
    // The login URL carries the API key, keep it out of error messages
    let response = request
        .send()
        .map_err(|e| ApiFailure::Transport(e.without_url()))?;
    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().unwrap_or_default();
        return Err(ApiFailure::Status {
            code: status.as_u16(),
            body: truncate(body.trim(), ERROR_BODY_LIMIT).to_owned(),
        });
    }
    let envelope: Envelope<T> = response
        .json()
        .map_err(|e| ApiFailure::Decode(e.without_url()))?;
    envelope.into_success().map_err(ApiFailure::Rejected)
}

fn truncate(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
