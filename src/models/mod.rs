pub mod attendee;
pub mod cancellation;
pub mod event;
pub mod user;
pub mod verification;
