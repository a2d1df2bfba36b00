//! Mutating operations. Each command validates its input, enforces the
//! relevant invariants (uniqueness, ownership), and persists through a
//! repository. Reads live in [`crate::query`].

pub mod expense;
pub mod user;
