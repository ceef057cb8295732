mod setups;
mod steps;

pub use academy_world::AcademyWorld;
