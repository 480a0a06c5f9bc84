pub mod auth;
pub mod salaries;
pub mod users;
