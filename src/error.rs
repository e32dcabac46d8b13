use thiserror::Error;

use crate::targets::artifact::Artifact;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JarError {
    /// No explicit classifier was set and the dependency carries more than one artifact, so there
    ///  is no single classifier to report. Pick one via `with_artifact` or an explicit classifier.
    #[error("cannot determine classifier: no explicit classifier is set and {dependency} has more than 1 artifact:{}", list_artifacts(.artifacts))]
    AmbiguousClassifier {
        dependency: String,
        artifacts: Vec<Artifact>,
    },

    #[error("{dependency} has no revision, so it has no fixed repository location")]
    MissingRevision {
        dependency: String,
    },
}

fn list_artifacts(artifacts: &[Artifact]) -> String {
    artifacts.iter()
        .map(|a| format!("\n\t{:?}", a))
        .collect()
}
