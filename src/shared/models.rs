use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

pub use super::schema;

pub use super::schema::{
    action_items, activities, call_agents, clients, comments, files, metrics, sessions, users,
};

/// Portal roles stored as text on the users row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Client,
    Viewer,
    Editor,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Client => "client",
            Self::Viewer => "viewer",
            Self::Editor => "editor",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "client" => Ok(Self::Client),
            "viewer" => Ok(Self::Viewer),
            "editor" => Ok(Self::Editor),
            _ => Err(()),
        }
    }
}

/// The fixed set of ingestion sources a metric row can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricSource {
    GoogleAnalytics,
    Linkedin,
    GoogleSheets,
    Calls,
}

impl MetricSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoogleAnalytics => "google_analytics",
            Self::Linkedin => "linkedin",
            Self::GoogleSheets => "google_sheets",
            Self::Calls => "calls",
        }
    }
}

impl std::str::FromStr for MetricSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google_analytics" => Ok(Self::GoogleAnalytics),
            "linkedin" => Ok(Self::Linkedin),
            "google_sheets" => Ok(Self::GoogleSheets),
            "calls" => Ok(Self::Calls),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, Selectable)]
#[diesel(table_name = users)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: String,
    pub client_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Display handle for activity descriptions, preferring the first name.
    pub fn display_name(&self) -> String {
        self.first_name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.id.clone())
    }
}

/// Identity fields refreshed on every external login.
#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = users)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUser {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, Selectable)]
#[diesel(table_name = clients)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub brand_name: Option<String>,
    pub logo: Option<String>,
    pub primary_color: String,
    pub subdomain: Option<String>,
    pub google_sheets_id: Option<String>,
    pub google_analytics_property_id: Option<String>,
    pub linkedin_page_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = clients)]
#[serde(rename_all = "camelCase")]
pub struct InsertClient {
    pub id: String,
    pub name: String,
    pub brand_name: Option<String>,
    pub logo: Option<String>,
    pub primary_color: Option<String>,
    pub subdomain: Option<String>,
    pub google_sheets_id: Option<String>,
    pub google_analytics_property_id: Option<String>,
    pub linkedin_page_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, AsChangeset)]
#[diesel(table_name = clients)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClient {
    pub name: Option<String>,
    pub brand_name: Option<String>,
    pub logo: Option<String>,
    pub primary_color: Option<String>,
    pub subdomain: Option<String>,
    pub google_sheets_id: Option<String>,
    pub google_analytics_property_id: Option<String>,
    pub linkedin_page_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, Selectable)]
#[diesel(table_name = metrics)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub id: i32,
    pub client_id: String,
    pub source: String,
    pub metric_type: String,
    pub value: f32,
    pub label: Option<String>,
    pub date: DateTime<Utc>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = metrics)]
#[serde(rename_all = "camelCase")]
pub struct InsertMetric {
    pub client_id: String,
    pub source: String,
    pub metric_type: String,
    pub value: f32,
    pub label: Option<String>,
    pub date: DateTime<Utc>,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, Selectable)]
#[diesel(table_name = call_agents)]
#[serde(rename_all = "camelCase")]
pub struct CallAgent {
    pub id: i32,
    pub client_id: String,
    pub name: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub total_calls: i32,
    pub qualified_calls: i32,
    pub conversion_rate: f32,
    pub rating: f32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = call_agents)]
#[serde(rename_all = "camelCase")]
pub struct InsertCallAgent {
    pub client_id: String,
    pub name: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub total_calls: i32,
    #[serde(default)]
    pub qualified_calls: i32,
    #[serde(default)]
    pub conversion_rate: f32,
    #[serde(default)]
    pub rating: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, Selectable)]
#[diesel(table_name = files)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub id: i32,
    pub client_id: String,
    pub uploaded_by: String,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i32,
    pub path: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = files)]
#[serde(rename_all = "camelCase")]
pub struct InsertFile {
    pub client_id: String,
    pub uploaded_by: String,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i32,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, Selectable)]
#[diesel(table_name = comments)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i32,
    pub client_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = comments)]
#[serde(rename_all = "camelCase")]
pub struct InsertComment {
    pub client_id: String,
    pub user_id: String,
    pub content: String,
}

/// Comment joined with its author, the shape pushed over the realtime channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentWithUser {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, Selectable)]
#[diesel(table_name = action_items)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: i32,
    pub client_id: String,
    pub title: String,
    pub completed: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = action_items)]
#[serde(rename_all = "camelCase")]
pub struct InsertActionItem {
    pub client_id: String,
    pub title: String,
    #[serde(default)]
    pub completed: Option<bool>,
    pub created_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, Selectable)]
#[diesel(table_name = activities)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i32,
    pub client_id: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub description: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = activities)]
#[serde(rename_all = "camelCase")]
pub struct InsertActivity {
    pub client_id: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub description: String,
    pub metadata: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_text() {
        for role in [
            UserRole::Admin,
            UserRole::Client,
            UserRole::Viewer,
            UserRole::Editor,
        ] {
            assert_eq!(role.as_str().parse::<UserRole>(), Ok(role));
        }
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn metric_source_rejects_unknown_tags() {
        assert_eq!(
            "google_analytics".parse::<MetricSource>(),
            Ok(MetricSource::GoogleAnalytics)
        );
        assert_eq!("calls".parse::<MetricSource>(), Ok(MetricSource::Calls));
        assert!("facebook".parse::<MetricSource>().is_err());
    }

    #[test]
    fn activity_serializes_type_tag() {
        let activity = Activity {
            id: 7,
            client_id: "acme".into(),
            activity_type: "file_upload".into(),
            description: "Ana uploaded report.pdf".into(),
            metadata: None,
            created_at: chrono::Utc::now(),
        };
        let value = serde_json::to_value(&activity).unwrap();
        assert_eq!(value["type"], "file_upload");
        assert_eq!(value["clientId"], "acme");
    }

    #[test]
    fn comment_with_user_flattens_comment_fields() {
        let now = chrono::Utc::now();
        let payload = CommentWithUser {
            comment: Comment {
                id: 3,
                client_id: "acme".into(),
                user_id: "u1".into(),
                content: "looks good".into(),
                created_at: now,
            },
            user: User {
                id: "u1".into(),
                email: Some("ana@acme.test".into()),
                first_name: Some("Ana".into()),
                last_name: None,
                profile_image_url: None,
                role: "client".into(),
                client_id: Some("acme".into()),
                created_at: now,
                updated_at: now,
            },
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["content"], "looks good");
        assert_eq!(value["user"]["firstName"], "Ana");
    }
}
