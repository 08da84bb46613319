//! Log-in and sign-up form.

mod auth_render;
mod auth_state;

pub use auth_render::render_auth;
pub use auth_state::{AuthCommand, AuthField, AuthMode, AuthState};
