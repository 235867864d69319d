pub mod docs;
pub mod hello;
pub mod predict;
pub mod status;
