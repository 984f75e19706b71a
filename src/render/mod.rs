pub mod icon;
pub mod object;
pub mod surface;
