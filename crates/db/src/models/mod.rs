pub mod salary;
pub mod user;
