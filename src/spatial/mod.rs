pub mod cluster;
pub mod index;
