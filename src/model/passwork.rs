use serde::{Deserialize, Serialize};

use super::nullable;

const SUCCESS: &str = "success";

/// Outer `{status, data}` wrapper every Passwork endpoint answers with.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwraps the payload, or hands back the offending status.
    pub fn into_success(self) -> Result<Option<T>, String> {
        if self.status == SUCCESS {
            Ok(self.data)
        } else {
            Err(self.status)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    #[serde(default, deserialize_with = "nullable")]
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchHit {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordDetail {
    #[serde(default, deserialize_with = "nullable")]
    pub vault_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub login: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    /// Base64 of the plain secret, despite the name.
    #[serde(default, deserialize_with = "nullable")]
    pub crypted_password: String,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub color: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub path: Vec<PathSegment>,
    #[serde(default, deserialize_with = "nullable")]
    pub custom: Vec<CustomField>,
    #[serde(default, deserialize_with = "nullable")]
    pub attachments: Vec<Attachment>,
}

/// One folder (or the vault itself) on the way down to a password.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PathSegment {
    #[serde(default, deserialize_with = "nullable")]
    pub order: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub kind: String,
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
}

/// User-defined field; both halves arrive base64 encoded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CustomField {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub value: String,
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub encrypted_key: String,
}
