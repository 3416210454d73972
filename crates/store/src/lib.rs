pub mod errors;
pub mod mem;
pub mod models;
pub mod repositories;

pub use errors::StoreError;
pub use mem::MemStore;
pub use models::*;
pub use repositories::*;
