//! Re-exports of all entities.

pub use super::closings::Entity as Closings;
