pub mod job;
pub mod system;
