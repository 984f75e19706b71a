pub mod animal;
pub mod building;
pub mod company;
pub mod survey;
