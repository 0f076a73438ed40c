use serde::{Deserialize, Serialize};

/// Login request sent to the service's auth endpoint
#[derive(Debug, Serialize)]
pub(super) struct AuthRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Successful login response
#[derive(Debug, Deserialize)]
pub(super) struct AuthResponse {
    pub token: String,
}

/// Filters for listing notifications
///
/// An empty `user_email` or `context` means "don't filter on it"; the
/// parameter is then left out of the request entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationQuery {
    /// Only notifications addressed to this user email
    pub user_email: String,
    /// Only notifications created under this context
    pub context: String,
    /// Maximum number of notifications to return
    pub limit: u32,
    /// Index of the first notification in the result window
    pub offset: u32,
}

impl Default for NotificationQuery {
    fn default() -> Self {
        Self {
            user_email: String::new(),
            context: String::new(),
            limit: 10,
            offset: 0,
        }
    }
}

impl NotificationQuery {
    /// Renders the query string the service expects.
    ///
    /// The parameter order and the literal `read=False` are part of the
    /// service's observed contract and must not change.
    pub(super) fn to_query_string(&self) -> String {
        let mut query = format!("limit={}&offset={}&read=False", self.limit, self.offset);
        if !self.user_email.is_empty() {
            query.push_str(&format!("&user_email={}", self.user_email));
        }
        if !self.context.is_empty() {
            query.push_str(&format!("&context={}", self.context));
        }
        query
    }
}

/// Payload for creating a notification
///
/// The wire body is sparse: a field left at its empty value is absent from
/// the serialized JSON, not sent as `null` or `""`. The service treats
/// absent and empty identically, so the client cannot express "explicitly
/// empty".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewNotification {
    /// Recipient user emails
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users_email: Vec<String>,

    /// Notification text
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,

    /// Context the notification belongs to
    #[serde(skip_serializing_if = "String::is_empty")]
    pub context: String,

    /// URL the notification links to
    #[serde(skip_serializing_if = "String::is_empty")]
    pub redirect_url: String,

    /// Franchises the notification applies to
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub franchises: Vec<String>,

    /// Caller-chosen identifier
    #[serde(skip_serializing_if = "String::is_empty")]
    pub identifier: String,
}

fn is_false(value: &bool) -> bool {
    !value
}

/// Partial update of a notification's read/opened flags
///
/// A flag set to `false` is omitted from the body rather than sent, so the
/// service only ever receives `true` values. Both flags false yields an
/// empty-body PATCH.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NotificationPatch {
    /// Mark the notification as read
    #[serde(skip_serializing_if = "is_false")]
    pub read: bool,

    /// Mark the notification as opened
    #[serde(skip_serializing_if = "is_false")]
    pub opened: bool,
}
