use reqwest::StatusCode;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::types::{
    AuthRequest, AuthResponse, NewNotification, NotificationPatch, NotificationQuery,
};
use crate::config::ClientSettings;
use crate::error::{AppError, AppResult};
use crate::external::client::build_http_client;

const AUTH_PATH: &str = "/auth";
const NOTIFICATION_PATH: &str = "/notification";

/// Fallback shown when listing fails at the transport level
pub const LIST_FALLBACK_MESSAGE: &str = "Não foi possível buscar notificações, tente novamente";
/// Fallback returned when creating a notification fails
pub const CREATE_FALLBACK_MESSAGE: &str = "Não foi possível criar notificações, tente novamente";
/// Fallback returned when updating a notification fails
pub const UPDATE_FALLBACK_MESSAGE: &str = "Não foi possível atualizar a notificação, tente novamente";

/// Client for the notification microservice
///
/// Authenticates once at construction and reuses the obtained session token
/// for every call. There is no re-authentication path: a client whose login
/// was rejected stays degraded (empty token) until replaced.
///
/// Each operation issues exactly one request; the client adds no retries,
/// queuing, or internal parallelism. Instances share no state, so callers
/// needing concurrent access use one instance per task.
///
/// Two surfaces are exposed per operation:
/// - `try_*` methods return [`AppResult`] and distinguish a service
///   rejection (non-200) from a transport failure;
/// - the plain methods reproduce the service's established caller contract:
///   they never fail, and report problems through in-band fallback values.
pub struct NotificationClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl NotificationClient {
    /// Authenticates against the service and returns a ready client.
    ///
    /// A rejected login (any non-200 response) does not fail construction:
    /// the client keeps an empty token and the service rejects its calls
    /// server-side. A transport-level failure is returned as an error since
    /// no response was obtained at all.
    pub async fn connect(settings: &ClientSettings) -> AppResult<Self> {
        settings.validate()?;

        let http = build_http_client(&settings.http)?;
        let base_url = settings.service.base_url.trim_end_matches('/').to_string();

        let token = Self::authenticate(
            &http,
            &base_url,
            &settings.service.username,
            &settings.service.password,
        )
        .await?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Whether construction obtained a session token.
    ///
    /// `false` means the login was rejected and every authorized call will
    /// fail server-side.
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    async fn authenticate(
        http: &reqwest::Client,
        base_url: &str,
        username: &str,
        password: &str,
    ) -> AppResult<String> {
        let url = format!("{}{}", base_url, AUTH_PATH);

        let response = http
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&AuthRequest { username, password })
            .send()
            .await
            .map_err(|e| Self::transport_error(AUTH_PATH, e))?;

        if response.status() != StatusCode::OK {
            warn!(
                status = response.status().as_u16(),
                "login rejected, client left without a session token"
            );
            return Ok(String::new());
        }

        let body: AuthResponse = response.json().await.map_err(|e| AppError::ExternalApi {
            endpoint: AUTH_PATH.to_string(),
            message: format!("invalid login response: {}", e),
            source: Some(e.into()),
        })?;

        Ok(format!("Token {}", body.token))
    }

    // ========================================================================
    // Typed surface
    // ========================================================================

    /// Lists unread notifications, optionally filtered by user email and
    /// context.
    ///
    /// Returns the service's pagination envelope unchanged.
    pub async fn try_get_notifications(&self, query: &NotificationQuery) -> AppResult<Value> {
        let url = format!(
            "{}{}?{}",
            self.base_url,
            NOTIFICATION_PATH,
            query.to_query_string()
        );

        let response = self
            .http
            .get(&url)
            .header("Authorization", &self.token)
            .send()
            .await
            .map_err(|e| Self::transport_error(NOTIFICATION_PATH, e))?;

        Self::parse_ok_json(NOTIFICATION_PATH, response).await
    }

    /// Creates a notification and returns the created record.
    pub async fn try_create_notification(&self, notification: &NewNotification) -> AppResult<Value> {
        let url = format!("{}{}", self.base_url, NOTIFICATION_PATH);

        let response = self
            .http
            .post(&url)
            .header("Authorization", &self.token)
            .header("Content-Type", "application/json")
            .json(notification)
            .send()
            .await
            .map_err(|e| Self::transport_error(NOTIFICATION_PATH, e))?;

        Self::parse_ok_json(NOTIFICATION_PATH, response).await
    }

    /// Updates a notification's read/opened flags and returns the updated
    /// record.
    ///
    /// An empty id is rejected locally; it would address the collection
    /// path instead of a notification.
    pub async fn try_update_notification(
        &self,
        notification_id: &str,
        patch: &NotificationPatch,
    ) -> AppResult<Value> {
        if notification_id.is_empty() {
            return Err(AppError::Validation {
                field: "notification_id".to_string(),
                reason: "Notification id cannot be empty".to_string(),
            });
        }

        let endpoint = format!("{}/{}", NOTIFICATION_PATH, notification_id);
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .http
            .patch(&url)
            .header("Authorization", &self.token)
            .header("Content-Type", "application/json")
            .json(patch)
            .send()
            .await
            .map_err(|e| Self::transport_error(&endpoint, e))?;

        Self::parse_ok_json(&endpoint, response).await
    }

    // ========================================================================
    // Sentinel-compatible surface
    // ========================================================================

    /// Lists unread notifications, reporting problems in-band.
    ///
    /// - 200: the pagination envelope, unchanged.
    /// - Any other status: an empty object `{}`.
    /// - Transport failure: `{"error_msg": ..., "message": ...}` with the
    ///   user-facing fallback text.
    pub async fn get_notifications(&self, query: &NotificationQuery) -> Value {
        match self.try_get_notifications(query).await {
            Ok(body) => body,
            Err(AppError::ServiceRejected { status, .. }) => {
                debug!(status, "listing notifications rejected");
                json!({})
            }
            Err(err) => {
                debug!(error = %err, "listing notifications failed");
                json!({
                    "error_msg": err.to_string(),
                    "message": LIST_FALLBACK_MESSAGE,
                })
            }
        }
    }

    /// Creates a notification, reporting problems in-band.
    ///
    /// Returns the created record on 200; on any failure, the fixed fallback
    /// string. Callers distinguish the outcomes by value shape.
    pub async fn create_notification(&self, notification: &NewNotification) -> Value {
        match self.try_create_notification(notification).await {
            Ok(body) => body,
            Err(err) => {
                debug!(error = %err, "creating notification failed");
                Value::String(CREATE_FALLBACK_MESSAGE.to_string())
            }
        }
    }

    /// Updates a notification's read/opened flags, reporting problems
    /// in-band.
    ///
    /// Returns the updated record on 200; on any failure, the fixed fallback
    /// string.
    pub async fn update_notification(
        &self,
        notification_id: &str,
        patch: &NotificationPatch,
    ) -> Value {
        match self.try_update_notification(notification_id, patch).await {
            Ok(body) => body,
            Err(err) => {
                debug!(error = %err, "updating notification failed");
                Value::String(UPDATE_FALLBACK_MESSAGE.to_string())
            }
        }
    }

    // ========================================================================
    // Private Helpers
    // ========================================================================

    fn transport_error(endpoint: &str, error: reqwest::Error) -> AppError {
        AppError::ExternalApi {
            endpoint: endpoint.to_string(),
            message: error.to_string(),
            source: Some(error.into()),
        }
    }

    async fn parse_ok_json(endpoint: &str, response: reqwest::Response) -> AppResult<Value> {
        if response.status() != StatusCode::OK {
            return Err(AppError::ServiceRejected {
                endpoint: endpoint.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.json().await.map_err(|e| AppError::ExternalApi {
            endpoint: endpoint.to_string(),
            message: format!("invalid JSON in response: {}", e),
            source: Some(e.into()),
        })
    }
}
