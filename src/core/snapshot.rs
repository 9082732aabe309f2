use crate::core::field_path::get_at_path;
use crate::error::FormError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Nested-record view of the form values; the payload sent to the sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormSnapshot(Value);

impl FormSnapshot {
    pub(crate) fn new(root: Value) -> Self {
        Self(root)
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        get_at_path(&self.0, path)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_json(self) -> Value {
        self.0
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, FormError> {
        T::deserialize(&self.0).map_err(|err| FormError::Decode(err.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationPayload {
    pub user_info: UserInfo,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub curp: String,
    pub rfc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub zip_code: String,
    pub external_number: String,
    pub internal_number: String,
    pub state: String,
    pub province: String,
    pub neighborhood: String,
}

impl TryFrom<&FormSnapshot> for IdentificationPayload {
    type Error = FormError;

    fn try_from(snapshot: &FormSnapshot) -> Result<Self, Self::Error> {
        snapshot.decode()
    }
}
