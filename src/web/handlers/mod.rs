pub mod analysis;
pub mod organizations;
