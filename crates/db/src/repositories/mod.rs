//! Repository layer: one struct of query functions per table.

pub mod salary_repo;
pub mod user_repo;

pub use salary_repo::{PgSalaryStore, SalaryRepo};
pub use user_repo::UserRepo;
