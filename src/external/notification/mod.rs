//! Client for the remote notification microservice.
//!
//! [`NotificationClient`] authenticates once at construction and exposes the
//! service's three operations: listing unread notifications, creating a
//! notification, and updating a notification's read/opened flags.

mod client;
mod types;

pub use client::{
    CREATE_FALLBACK_MESSAGE, LIST_FALLBACK_MESSAGE, NotificationClient, UPDATE_FALLBACK_MESSAGE,
};
pub use types::{NewNotification, NotificationPatch, NotificationQuery};
