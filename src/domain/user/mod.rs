//! User domain: family members and device bindings

mod model;
mod repository;

pub use model::{User, UserDevice, UserRole};
pub use repository::UserRepository;
