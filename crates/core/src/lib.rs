//! Domain logic for the hrdesk HR backend.
//!
//! The `core` crate holds no database or HTTP dependencies. Persistence is
//! reached through the [`salary::SalaryStore`] trait, implemented in
//! `hrdesk-db` and by in-memory doubles in tests.

pub mod currency;
pub mod error;
pub mod roles;
pub mod salary;
pub mod salary_filter;
pub mod salary_import;
pub mod types;
