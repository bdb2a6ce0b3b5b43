//! Pack module - named clip collections and their sharing rules.

mod aggregate;
mod errors;
mod name;
mod ownership;

pub use aggregate::Pack;
pub use errors::PackError;
pub use name::PackName;
pub use ownership::SharedWithContributors;
