//! Cross-cutting helpers shared by all layers

pub mod retry;
pub mod shutdown;
