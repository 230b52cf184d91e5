use serde::{Deserialize, Serialize};

/// A registered user as persisted in the user store.
///
/// `id` is derived from the registration email and never set by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub marketing_consent: bool,
}

/// Consent filter for the read path: drops the email unless the user agreed
/// to marketing. Stored records keep their email.
pub fn apply_consent(mut record: UserRecord) -> UserRecord {
    if !record.marketing_consent {
        record.email = None;
    }
    record
}

/// Registration payload (untrusted). Unknown fields such as `id` or
/// `accessToken` are ignored by deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub marketing_consent: bool,
}

impl RegistrationInput {
    /// The email if it is present and not blank.
    pub fn usable_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.trim().is_empty())
    }
}

/// Response body for a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub id: String,
    pub access_token: String,
}
