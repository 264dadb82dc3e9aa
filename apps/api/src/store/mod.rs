//! Persistence boundary: free functions over `&PgPool`, one module per table.

pub mod history;
pub mod resumes;
pub mod users;
