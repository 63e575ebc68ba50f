//! # EventHall Core
//!
//! Domain types and rules for event booking: the event status machine,
//! location overlap detection, and attendee registration. Storage and email
//! delivery are reached only through the traits in [`repository`] and
//! [`notifier`].

pub mod auth;
pub mod errors;
pub mod join_link;
pub mod lifecycle;
pub mod models;
pub mod notifier;
pub mod overlap;
pub mod registration;
pub mod reminders;
pub mod repository;
pub mod validation;
