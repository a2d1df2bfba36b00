//! Read-only operations over the repositories. Ownership has already been
//! established at the route level; record-level checks happen here where a
//! looked-up record carries its own owner id.

pub mod expense;
pub mod user;
