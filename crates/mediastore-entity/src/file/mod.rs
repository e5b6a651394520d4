//! File entity.

pub mod filter;
pub mod model;
pub mod reference;

pub use filter::FileFilters;
pub use model::{File, FilePayload, NewFile};
pub use reference::ReferenceType;
