pub mod http;

use crate::core::snapshot::FormSnapshot;
use crate::error::{SinkError, SourceError};
use crate::table::{TableStore, UserRecord};
use serde_json::Value;
use tracing::{info, warn};

pub use http::{HttpSubmissionSink, HttpUserSource};

/// Opaque body returned by a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkResponse(pub Value);

pub trait SubmissionSink: Send + Sync {
    fn submit(&self, payload: &FormSnapshot) -> Result<SinkResponse, SinkError>;
}

pub trait UserSource {
    fn fetch_users(&self) -> Result<Vec<UserRecord>, SourceError>;
}

/// Fills `table` from `source`. A failed fetch leaves the table empty; the
/// loading flag clears either way.
pub fn load_users(source: &dyn UserSource, table: &mut TableStore) {
    match source.fetch_users() {
        Ok(records) => {
            info!(count = records.len(), "user records loaded");
            table.load(records);
        }
        Err(err) => {
            warn!(error = %err, "failed to fetch user records");
            table.fail_loading();
        }
    }
}
