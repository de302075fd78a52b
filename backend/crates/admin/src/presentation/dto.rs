//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Non-string values read as absent
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Request for POST /admin/login
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub password: Option<String>,
}

/// Response for POST /admin/login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub token: String,
}

/// Request for POST /admin/change-password
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default, deserialize_with = "text")]
    pub current_password: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub new_password: Option<String>,
}

/// Plain `{ "ok": true }` acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Response for POST /admin/backup
#[derive(Debug, Clone, Serialize)]
pub struct BackupResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}
