pub mod handlers;
pub mod render;
pub mod schemas;
