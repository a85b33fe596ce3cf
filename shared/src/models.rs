//! # Wire and domain records
//!
//! Rows of the hosted store (`users`, `clients`, `client_settings`,
//! `contacts`), the auth session, and the read models pages work with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::calendar::REFERENCE_TZ;

/// Tenant identifier. The store may hand it out as a number or as text, and
/// it is written back in the same form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientId::Number(n) => write!(f, "{}", n),
            ClientId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ClientId {
    fn from(value: &str) -> Self {
        ClientId::Text(value.to_string())
    }
}

impl From<i64> for ClientId {
    fn from(value: i64) -> Self {
        ClientId::Number(value)
    }
}

/// The authenticated identity as reported by the auth service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub last_sign_in_at: Option<String>,
}

impl AuthUser {
    /// Last sign-in rendered in the reference timezone, or `Not available`
    pub fn last_login_label(&self) -> String {
        self.last_sign_in_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|at| {
                at.with_timezone(&Utc)
                    .with_timezone(&REFERENCE_TZ)
                    .format("%d/%m/%Y, %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|| "Not available".to_string())
    }
}

/// Token grant returned by the auth service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .map(|expires_at| now.timestamp() >= expires_at)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Body of `PUT /auth/v1/user`; only the present field is changed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Row of `users` mapping an auth identity to its tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMapping {
    #[serde(default)]
    pub client_id: Option<ClientId>,
}

/// Row of `clients`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    #[serde(default)]
    pub name: Option<String>,
}

/// What the account page shows
#[derive(Debug, Clone, PartialEq)]
pub struct AccountProfile {
    pub client_id: ClientId,
    pub business_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFrequency {
    Weekly,
    #[default]
    Monthly,
}

impl ReportFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFrequency::Weekly => "weekly",
            ReportFrequency::Monthly => "monthly",
        }
    }

    /// Stored column value; anything unrecognised reads as the default
    pub fn from_stored(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" => ReportFrequency::Weekly,
            _ => ReportFrequency::default(),
        }
    }
}

fn stored_frequency<'de, D>(deserializer: D) -> Result<Option<ReportFrequency>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(ReportFrequency::from_stored(&text)),
        _ => Some(ReportFrequency::default()),
    }))
}

pub const DEFAULT_ABANDONMENT_TIMEOUT_MINUTES: i64 = 45;
pub const DEFAULT_ATTRIBUTION_WINDOW_DAYS: i64 = 7;

/// Row of `client_settings`. Every column except the key may be null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettingsRow {
    pub client_id: ClientId,
    #[serde(default, deserialize_with = "stored_frequency")]
    pub report_frequency: Option<ReportFrequency>,
    #[serde(default)]
    pub include_charts: Option<bool>,
    #[serde(default)]
    pub report_email: Option<String>,
    #[serde(default)]
    pub sender_email: Option<String>,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub reply_to_email: Option<String>,
    #[serde(default)]
    pub abandonment_timeout_minutes: Option<i64>,
    #[serde(default)]
    pub attribution_window_days: Option<i64>,
}

impl ClientSettingsRow {
    /// The row created for a tenant that has none yet
    pub fn defaults_for(client_id: ClientId) -> Self {
        Self {
            client_id,
            report_frequency: Some(ReportFrequency::Monthly),
            include_charts: Some(true),
            report_email: Some(String::new()),
            sender_email: Some(String::new()),
            sender_name: Some(String::new()),
            reply_to_email: Some(String::new()),
            abandonment_timeout_minutes: Some(DEFAULT_ABANDONMENT_TIMEOUT_MINUTES),
            attribution_window_days: Some(DEFAULT_ATTRIBUTION_WINDOW_DAYS),
        }
    }
}

/// Reporting settings with nulls replaced by defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    pub report_frequency: ReportFrequency,
    pub include_charts: bool,
    pub report_email: String,
    pub sender_email: String,
    pub sender_name: String,
    pub reply_to_email: String,
    /// Read-only here; managed by the recovery pipeline
    pub abandonment_timeout_minutes: i64,
    pub attribution_window_days: i64,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            report_frequency: ReportFrequency::Monthly,
            include_charts: true,
            report_email: String::new(),
            sender_email: String::new(),
            sender_name: String::new(),
            reply_to_email: String::new(),
            abandonment_timeout_minutes: DEFAULT_ABANDONMENT_TIMEOUT_MINUTES,
            attribution_window_days: DEFAULT_ATTRIBUTION_WINDOW_DAYS,
        }
    }
}

impl From<&ClientSettingsRow> for ReportSettings {
    fn from(row: &ClientSettingsRow) -> Self {
        let defaults = ReportSettings::default();
        Self {
            report_frequency: row.report_frequency.unwrap_or(defaults.report_frequency),
            include_charts: row.include_charts.unwrap_or(defaults.include_charts),
            report_email: row.report_email.clone().unwrap_or_default(),
            sender_email: row.sender_email.clone().unwrap_or_default(),
            sender_name: row.sender_name.clone().unwrap_or_default(),
            reply_to_email: row.reply_to_email.clone().unwrap_or_default(),
            abandonment_timeout_minutes: row
                .abandonment_timeout_minutes
                .unwrap_or(defaults.abandonment_timeout_minutes),
            attribution_window_days: row
                .attribution_window_days
                .unwrap_or(defaults.attribution_window_days),
        }
    }
}

/// Partial update of `client_settings`; absent fields are left untouched
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_frequency: Option<ReportFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_charts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_email: Option<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == SettingsPatch::default()
    }

    /// Apply to a row in place, as the store would
    pub fn apply_to(&self, row: &mut ClientSettingsRow) {
        if let Some(value) = self.report_frequency {
            row.report_frequency = Some(value);
        }
        if let Some(value) = self.include_charts {
            row.include_charts = Some(value);
        }
        if let Some(value) = &self.report_email {
            row.report_email = Some(value.clone());
        }
        if let Some(value) = &self.sender_email {
            row.sender_email = Some(value.clone());
        }
        if let Some(value) = &self.sender_name {
            row.sender_name = Some(value.clone());
        }
        if let Some(value) = &self.reply_to_email {
            row.reply_to_email = Some(value.clone());
        }
    }
}

impl From<&ReportSettings> for SettingsPatch {
    /// Every user-editable field of the form
    fn from(settings: &ReportSettings) -> Self {
        Self {
            report_frequency: Some(settings.report_frequency),
            include_charts: Some(settings.include_charts),
            report_email: Some(settings.report_email.clone()),
            sender_email: Some(settings.sender_email.clone()),
            sender_name: Some(settings.sender_name.clone()),
            reply_to_email: Some(settings.reply_to_email.clone()),
        }
    }
}

/// Row of `contacts` captured by the home page form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
}

/// Error body of the auth service or the data store; each uses a different
/// field for the human-readable part
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

impl ApiErrorBody {
    pub fn best_message(&self) -> Option<String> {
        [
            &self.message,
            &self.error_description,
            &self.msg,
            &self.error,
        ]
        .into_iter()
        .flatten()
        .find(|m| !m.trim().is_empty())
        .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_client_id_accepts_numbers_and_text() {
        let mapping: UserMapping = serde_json::from_str(r#"{"client_id": 42}"#).unwrap();
        assert_eq!(mapping.client_id, Some(ClientId::Number(42)));
        let mapping: UserMapping = serde_json::from_str(r#"{"client_id": "c-7"}"#).unwrap();
        assert_eq!(mapping.client_id, Some(ClientId::from("c-7")));
        let mapping: UserMapping = serde_json::from_str(r#"{"client_id": null}"#).unwrap();
        assert_eq!(mapping.client_id, None);

        assert_eq!(serde_json::to_string(&ClientId::Number(42)).unwrap(), "42");
        assert_eq!(ClientId::from("c-7").to_string(), "c-7");
    }

    #[test]
    fn test_settings_row_defaults() {
        let row = ClientSettingsRow::defaults_for(ClientId::Number(1));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["report_frequency"], "monthly");
        assert_eq!(json["include_charts"], true);
        assert_eq!(json["abandonment_timeout_minutes"], 45);
        assert_eq!(json["attribution_window_days"], 7);
        assert_eq!(json["sender_name"], "");
    }

    #[test]
    fn test_read_model_fills_nulls() {
        let row: ClientSettingsRow = serde_json::from_str(
            r#"{"client_id": 3, "report_frequency": "weekly", "include_charts": null}"#,
        )
        .unwrap();
        let settings = ReportSettings::from(&row);
        assert_eq!(settings.report_frequency, ReportFrequency::Weekly);
        assert!(settings.include_charts);
        assert_eq!(settings.report_email, "");
        assert_eq!(settings.abandonment_timeout_minutes, 45);
    }

    #[test]
    fn test_unrecognised_frequency_reads_as_monthly() {
        let row: ClientSettingsRow =
            serde_json::from_str(r#"{"client_id": 1, "report_frequency": "daily"}"#).unwrap();
        assert_eq!(row.report_frequency, Some(ReportFrequency::Monthly));
        assert_eq!(ReportSettings::from(&row).report_frequency, ReportFrequency::Monthly);

        let row: ClientSettingsRow =
            serde_json::from_str(r#"{"client_id": 1, "report_frequency": " Weekly "}"#).unwrap();
        assert_eq!(row.report_frequency, Some(ReportFrequency::Weekly));

        let row: ClientSettingsRow =
            serde_json::from_str(r#"{"client_id": 1, "report_frequency": 3}"#).unwrap();
        assert_eq!(row.report_frequency, Some(ReportFrequency::Monthly));
    }

    #[test]
    fn test_null_or_missing_frequency_uses_default() {
        let row: ClientSettingsRow =
            serde_json::from_str(r#"{"client_id": 1, "report_frequency": null}"#).unwrap();
        assert_eq!(row.report_frequency, None);
        assert_eq!(ReportSettings::from(&row).report_frequency, ReportFrequency::Monthly);

        let row: ClientSettingsRow = serde_json::from_str(r#"{"client_id": 1}"#).unwrap();
        assert_eq!(row.report_frequency, None);
    }

    #[test]
    fn test_patch_only_serializes_present_fields() {
        let patch = SettingsPatch {
            sender_name: Some("Shop".to_string()),
            include_charts: Some(false),
            ..SettingsPatch::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"include_charts":false,"sender_name":"Shop"}"#);
        assert!(SettingsPatch::default().is_empty());
        assert!(!patch.is_empty());

        let mut row = ClientSettingsRow::defaults_for(ClientId::Number(1));
        patch.apply_to(&mut row);
        assert_eq!(row.include_charts, Some(false));
        assert_eq!(row.report_frequency, Some(ReportFrequency::Monthly));
    }

    #[test]
    fn test_user_update_body() {
        let update = UserUpdate {
            email: Some("new@example.com".to_string()),
            ..UserUpdate::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"email":"new@example.com"}"#);
    }

    #[test]
    fn test_error_body_message_precedence() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
                .unwrap();
        assert_eq!(body.best_message().as_deref(), Some("Invalid login credentials"));

        let body: ApiErrorBody =
            serde_json::from_str(r#"{"code":"42501","message":"permission denied for table clients"}"#)
                .unwrap();
        assert_eq!(body.best_message().as_deref(), Some("permission denied for table clients"));
        assert_eq!(ApiErrorBody::default().best_message(), None);
    }

    #[test]
    fn test_last_login_label() {
        let mut user = AuthUser {
            id: "u1".to_string(),
            email: None,
            last_sign_in_at: Some("2025-10-16T22:30:00Z".to_string()),
        };
        assert_eq!(user.last_login_label(), "17/10/2025, 00:30:00");
        user.last_sign_in_at = None;
        assert_eq!(user.last_login_label(), "Not available");
    }

    #[test]
    fn test_session_expiry() {
        let session = Session {
            access_token: "token".to_string(),
            token_type: None,
            refresh_token: None,
            expires_at: Some(1_700_000_000),
            user: AuthUser {
                id: "u1".to_string(),
                email: None,
                last_sign_in_at: None,
            },
        };
        assert!(session.is_expired(Utc.timestamp_opt(1_700_000_000, 0).unwrap()));
        assert!(!session.is_expired(Utc.timestamp_opt(1_699_999_999, 0).unwrap()));
    }
}
