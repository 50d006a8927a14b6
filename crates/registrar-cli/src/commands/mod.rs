//! Command implementations for registrar-cli

pub mod check;
pub mod compose;
pub mod sort;

pub use check::run_check;
pub use compose::run_compose;
pub use sort::run_sort;
