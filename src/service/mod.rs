//! Repositories and request validation over the SQL builder.

mod crud;
mod validation;
pub use crud::Repository;
pub use validation::{RequestValidator, WriteSet};
