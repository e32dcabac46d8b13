pub mod artifact;
pub mod capability;
pub mod exclude;
pub mod jar_dependency;
