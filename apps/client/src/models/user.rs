use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity record for the signed-in account.
///
/// Serialized as the `user_data` blob by the session store, so field names
/// follow the camelCase shape the backend returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_login_at: DateTime<Utc>,
}
