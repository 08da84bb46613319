//! The open shopping list: optimistic edits, whole-list saves, rollback
//! and category-grouped display rows.

mod editor_render;
mod editor_state;
mod item_rows;

pub use editor_render::render_items;
pub use editor_state::{ListEditor, SaveRequest};
pub use item_rows::{ItemRow, item_rows};
