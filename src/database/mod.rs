pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

pub use store::Store;
