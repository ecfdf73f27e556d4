pub mod pulls;
pub mod statistics;
pub mod teams;
pub mod users;
