pub mod placement;
pub mod polygon;
