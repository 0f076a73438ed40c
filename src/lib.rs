//! Client library for the notification microservice.
//!
//! The client logs in once with a username/password pair, keeps the returned
//! session token, and exposes the service's three operations: listing unread
//! notifications, creating a notification, and marking one read/opened.
//!
//! ```no_run
//! use notify_client::{ClientSettings, NewNotification, NotificationClient, NotificationQuery};
//!
//! # async fn example() -> notify_client::AppResult<()> {
//! let settings = ClientSettings::new("admin", "secret", "http://localhost:8765");
//! let client = NotificationClient::connect(&settings).await?;
//!
//! let page = client.get_notifications(&NotificationQuery::default()).await;
//!
//! let created = client
//!     .create_notification(&NewNotification {
//!         text: "Pedido atualizado".to_string(),
//!         context: "order".to_string(),
//!         ..Default::default()
//!     })
//!     .await;
//! # let _ = (page, created);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod logger;

pub use config::{ClientSettings, ConfigLoader};
pub use error::{AppError, AppResult};
pub use external::notification::{
    NewNotification, NotificationClient, NotificationPatch, NotificationQuery,
};
