pub mod attendance;
pub mod employee;
pub mod labels;
pub mod stats;
pub mod user;
