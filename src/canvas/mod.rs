pub mod buffer;
pub mod color;
pub mod composite;
pub mod difference;
