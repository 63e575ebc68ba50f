pub mod admin;
pub mod attendees;
pub mod events;
pub mod health;
