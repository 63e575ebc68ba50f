pub mod attendee;
pub mod event;
