pub mod picking;
pub mod render;
