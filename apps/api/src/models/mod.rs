pub mod application;
pub mod feedback;
pub mod job;
pub mod recommendation;
