//! Account entity.

pub mod filter;
pub mod model;

pub use filter::AccountFilters;
pub use model::{Account, NewAccount};
