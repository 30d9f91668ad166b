//! # HTTP Handlers
//!
//! One module per resource. Handlers extract, call a kasir-db repository,
//! and wrap the result in JSON; they hold no business rules of their own.
//!
//! Extractors are taken as `Result<_, Rejection>` so malformed paths,
//! queries and bodies come back in the same `{code, message}` shape as
//! every other error.

pub mod category;
pub mod checkout;
pub mod health;
pub mod product;
pub mod report;
pub mod transaction;
