mod app_events;
mod app_render;
mod app_responses;
mod app_state;


pub use app_state::{App, Focus, SESSION_EXPIRED, Screen};
