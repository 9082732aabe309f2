use super::{SinkResponse, SubmissionSink, UserSource};
use crate::config::EngineConfig;
use crate::core::snapshot::FormSnapshot;
use crate::error::{SinkError, SourceError};
use crate::table::{Geo, UserRecord};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Reads user records from a JSONPlaceholder-shaped endpoint.
pub struct HttpUserSource {
    agent: ureq::Agent,
    url: String,
}

impl HttpUserSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            agent: ureq::agent(),
            url: url.into(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.users_url.clone())
    }
}

impl UserSource for HttpUserSource {
    fn fetch_users(&self) -> Result<Vec<UserRecord>, SourceError> {
        debug!(url = %self.url, "fetching user records");
        let response = self
            .agent
            .get(&self.url)
            .call()
            .map_err(|err| SourceError::Transport(err.to_string()))?;
        let users: Vec<RemoteUser> = response
            .into_json()
            .map_err(|err| SourceError::Decode(err.to_string()))?;
        Ok(users.into_iter().map(UserRecord::from).collect())
    }
}

/// Posts the snapshot as JSON and returns the response body untouched.
pub struct HttpSubmissionSink {
    agent: ureq::Agent,
    url: String,
}

impl HttpSubmissionSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            agent: ureq::agent(),
            url: url.into(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.submit_url.clone())
    }
}

impl SubmissionSink for HttpSubmissionSink {
    fn submit(&self, payload: &FormSnapshot) -> Result<SinkResponse, SinkError> {
        debug!(url = %self.url, "posting identification form");
        let response = match self.agent.post(&self.url).send_json(payload) {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(SinkError::Rejected { status, body });
            }
            Err(err) => return Err(SinkError::Transport(err.to_string())),
        };
        let body: Value = response
            .into_json()
            .map_err(|err| SinkError::Decode(err.to_string()))?;
        Ok(SinkResponse(body))
    }
}

#[derive(Debug, Deserialize)]
struct RemoteUser {
    id: u64,
    name: String,
    email: String,
    website: String,
    address: RemoteAddress,
}

#[derive(Debug, Deserialize)]
struct RemoteAddress {
    geo: Geo,
}

impl From<RemoteUser> for UserRecord {
    fn from(user: RemoteUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            website: user.website,
            geo: user.address.geo,
        }
    }
}
