pub(crate) mod context;
pub(crate) mod memory;

pub use context::StoreContext;
pub use memory::{FindOptions, MemoryStore};
