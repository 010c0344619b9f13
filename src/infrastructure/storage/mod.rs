//! Storage implementations outside the database

mod memory;

pub use memory::InMemoryStore;
