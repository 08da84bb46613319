//! List management pane: the user's lists plus create, rename and delete.

mod lists_render;
mod lists_state;

pub use lists_render::render_sidebar;
pub use lists_state::{AfterDelete, ListCommand, ListsMode, ListsState};
