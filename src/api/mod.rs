pub mod collections;
pub mod common;
pub mod conformance;
pub mod format;
pub mod html;
pub mod landing;
pub mod tiles;

pub use common::*;
