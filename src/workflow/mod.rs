//! Group order workflows: joining an existing order and creating a new one.
//!
//! Both workflows are pure. They validate input against a record and compute the
//! record to persist; the repository applies the result inside a transaction.

mod create;
mod join;

pub use create::*;
pub use join::*;
