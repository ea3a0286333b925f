//! Role-based access control.
//!
//! [`permissions`] holds the static role x resource x action matrix;
//! [`guard`] wraps every CRUD verb in a check-then-delegate helper so no
//! handler talks to a repository without an authorization decision first.

pub mod guard;
pub mod permissions;
