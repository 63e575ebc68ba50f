#[path = "../test_utils.rs"]
mod test_utils;

mod attendees_test;
mod events_test;
mod middleware_test;
