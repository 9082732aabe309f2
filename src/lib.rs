pub mod config;
pub mod core;
pub mod error;
pub mod remote;
pub mod runtime;
pub mod state;
pub mod table;
pub mod task;

pub use crate::core::catalog;
pub use crate::core::field_path;
pub use crate::core::form_engine;
pub use crate::core::form_event;
pub use crate::core::schema;
pub use crate::core::snapshot;
pub use crate::core::validation;
pub use crate::core::validators;

pub use config::EngineConfig;
pub use crate::core::FieldPath;
pub use crate::core::form_engine::{FieldView, FormEngine};
pub use crate::core::schema::{FieldSpec, FormSchema, identification_schema, paths};
pub use crate::core::snapshot::{FormSnapshot, IdentificationPayload};
pub use crate::core::validation::ValidationResult;
pub use error::{ConfigError, FormError, SinkError, SourceError, SubmitRefused};
pub use remote::{SinkResponse, SubmissionSink, UserSource, load_users};
pub use runtime::FormRuntime;
pub use table::{TableStore, UserRecord};
pub use task::{SubmissionLifecycle, SubmissionPhase, SubmissionState};
