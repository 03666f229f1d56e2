pub mod memory_store;
pub mod password;
pub mod seed;
pub mod sessions;
