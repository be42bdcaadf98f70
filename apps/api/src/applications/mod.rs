pub mod handlers;
pub mod uploads;
