use anyhow::anyhow;
use tracing::debug;

use crate::error::JarError;
use crate::maven::coordinates::Coordinate;
use crate::targets::artifact::Artifact;
use crate::targets::jar_dependency::JarDependency;

/// Where a file lives in a Maven repository, as recovered from its repository relative path
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct ArtifactLocation {
    pub coordinate: Coordinate,
    pub classifier: Option<String>,
    pub ext: String, // without leading '.'
}

/// The location of `artifact` relative to a repository root, or the artifact's own url if it has
///  one.
pub fn artifact_path(coordinate: &Coordinate, artifact: &Artifact) -> Result<String, JarError> {
    if let Some(url) = artifact.url() {
        return Ok(url.to_string());
    }

    let rev = coordinate.rev.as_deref()
        .ok_or_else(|| JarError::MissingRevision { dependency: coordinate.id() })?;

    let classifier_string = match artifact.classifier() {
        None | Some("") => "".to_string(),
        Some(c) => format!("-{}", c),
    };

    Ok(format!(
        "{}/{}/{}/{}-{}{}.{}",
        coordinate.org.replace('.', "/"),
        coordinate.name,
        rev,
        artifact.name(),
        rev,
        classifier_string,
        artifact.ext().unwrap_or(artifact.type_()),
    ))
}

/// One path per artifact of the dependency. A dependency without artifact overrides stands for
///  its plain jar.
pub fn dependency_paths(dependency: &JarDependency) -> Result<Vec<String>, JarError> {
    let result = if dependency.artifacts().is_empty() {
        let classifier = dependency.classifier()?.map(str::to_string);
        let implicit = Artifact::new(dependency.name(), None, None, None, None, classifier);
        vec![artifact_path(dependency.coordinate(), &implicit)?]
    }
    else {
        dependency.artifacts().iter()
            .map(|a| artifact_path(dependency.coordinate(), a))
            .collect::<Result<Vec<_>, _>>()?
    };

    debug!("{}: repository paths {:?}", dependency, result);
    Ok(result)
}

fn parse_file_name(file_name: &str, name: &str, rev: &str) -> anyhow::Result<(Option<String>, String)> {
    let prefix_len = name.len() + rev.len() + 1;
    let prefix_matches = file_name.len() > prefix_len
        && file_name.starts_with(name)
        && file_name[name.len()..].starts_with('-')
        && file_name[name.len() + 1..].starts_with(rev);
    if !prefix_matches {
        return Err(anyhow!("{} is not a valid maven file name: expected to start with {}-{}", file_name, name, rev));
    }
    let rest = &file_name[prefix_len..];

    let (rest, ext) = match rest.rfind('.') {
        Some(last_dot) if last_dot + 1 < rest.len() => (&rest[..last_dot], &rest[last_dot + 1..]),
        _ => return Err(anyhow!("{} is not a valid maven file name: no extension", file_name)),
    };

    let classifier = if rest.is_empty() {
        None
    }
    else if rest.len() > 1 && rest.starts_with('-') {
        Some(rest[1..].to_string())
    }
    else {
        return Err(anyhow!("{} is not a valid maven file name: invalid classifier format", file_name));
    };

    Ok((classifier, ext.to_string()))
}

/// path is relative to the repository root, i.e. it starts with something like "org/..." or
///  "com/..."
pub fn parse_artifact_path(path: &str) -> anyhow::Result<ArtifactLocation> {
    let segments = path.trim_matches('/').split('/').collect::<Vec<_>>();
    if segments.len() < 4 || segments.iter().any(|s| s.is_empty()) {
        return Err(anyhow!("not a valid Maven artifact path: {:?}", path));
    }

    let (org_segments, rest) = segments.split_at(segments.len() - 3);
    let (name, rev, file_name) = (rest[0], rest[1], rest[2]);

    let (classifier, ext) = parse_file_name(file_name, name, rev)?;

    Ok(ArtifactLocation {
        coordinate: Coordinate::new(org_segments.join("."), name, Some(rev)),
        classifier,
        ext,
    })
}
