pub mod coordinates;
pub mod paths;
