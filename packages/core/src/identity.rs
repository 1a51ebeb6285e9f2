// ABOUTME: Identity record for the signed-in user and its permissive wire form
// ABOUTME: The profile_setup flag is the pivot of the session state machine

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The authenticated user as known to the client.
///
/// Always carries a non-empty `id`; build one from the wire with
/// [`IdentityRecord::from_payload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub profile_setup: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u8>,
}

/// User object exactly as the API sends it; every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub profile_setup: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_color")]
    pub color: Option<u8>,
}

impl IdentityRecord {
    /// Promote a wire payload to an identity. `None` unless the payload has a non-empty id.
    pub fn from_payload(payload: UserPayload) -> Option<Self> {
        let id = payload.id.filter(|id| !id.trim().is_empty())?;
        Some(Self {
            id,
            email: payload.email.unwrap_or_default(),
            first_name: payload.first_name,
            last_name: payload.last_name,
            profile_setup: payload.profile_setup,
            image: payload.image,
            color: payload.color,
        })
    }

    /// "First Last" when both names are set, otherwise the email address
    pub fn display_name(&self) -> String {
        match (non_blank(&self.first_name), non_blank(&self.last_name)) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            _ => self.email.clone(),
        }
    }

    pub fn has_valid_id(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// Older API builds send profileSetup as the string "true"/"false".
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(flag) => Ok(flag),
        Value::String(text) => Ok(text.trim().eq_ignore_ascii_case("true")),
        Value::Null => Ok(false),
        Value::Number(n) => Ok(n.as_i64().map(|n| n != 0).unwrap_or(false)),
        other => Err(serde::de::Error::custom(format!(
            "expected boolean profileSetup, got {}",
            other
        ))),
    }
}

fn lenient_color<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_u64().and_then(|n| u8::try_from(n).ok())),
        Value::String(text) => Ok(text.trim().parse::<u8>().ok()),
        other => Err(serde::de::Error::custom(format!(
            "expected color index, got {}",
            other
        ))),
    }
}
