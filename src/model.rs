//! Domain records shared by the backend, the list editor and the UI.
//!
//! These are the statically-typed counterparts of the backend's schema-less
//! objects. Only the fields the application actually reads or writes are
//! modelled; serialization follows the backend's JSON layout.

mod category;
mod grouping;
mod item;
mod list;

pub use category::Category;
pub use grouping::{CategoryExpansion, CategoryGroup, group_by_category};
pub use item::{ItemId, ShoppingItem};
pub use list::{ListId, ListSummary, ShoppingList, UserId};
