pub mod declaration;
pub mod error;
pub mod maven;
pub mod targets;

pub use error::JarError;
pub use maven::coordinates::Coordinate;
pub use targets::artifact::{Artifact, ArtifactSpec};
pub use targets::exclude::Exclude;
pub use targets::jar_dependency::{JarDependency, JarOptions};
