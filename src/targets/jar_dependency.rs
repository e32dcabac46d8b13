use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use tracing::trace;

use crate::error::JarError;
use crate::maven::coordinates::Coordinate;
use crate::targets::artifact::{key_part, Artifact, ArtifactSpec};
use crate::targets::capability::{BuildTarget, ExternalDependency, TargetKind};
use crate::targets::exclude::Exclude;

/// Everything a jar dependency can be declared with besides its coordinate.
#[derive(PartialEq, Eq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct JarOptions {
    /// Pin this revision even if transitive dependencies ask for a different one. Only meaningful
    ///  with a revision.
    #[serde(default)]
    pub force: bool,
    /// Extension of the artifact if it differs from its type, e.g. Maven 'bundle' artifacts
    ///  stored as jars.
    #[serde(default)]
    pub ext: Option<String>,
    /// Location of the artifact if it is not at its standard place in the repository
    #[serde(default)]
    pub url: Option<String>,
    /// URL of existing javadocs to link against
    #[serde(default)]
    pub apidocs: Option<String>,
    #[serde(default, rename = "type")]
    pub type_: Option<String>,
    /// The artifact variant to use. For more than one variant, see `JarDependency::with_artifact`.
    #[serde(default)]
    pub classifier: Option<String>,
    /// Inhibits caching, e.g. for -SNAPSHOT artifacts under active development
    #[serde(default)]
    pub mutable: Option<bool>,
    /// Tags per exclusivity key; repeated tags collapse into one.
    #[serde(default)]
    pub exclusives: BTreeMap<String, Vec<String>>,
}

/// A pre-built dependency from a Maven style repository.
///
/// Identity (`Eq`, `Hash`) is the coordinate alone: two dependencies with the same org, name and
///  rev are interchangeable for deduplication even if their excludes, artifacts or configurations
///  differ. Use `cache_key` to tell those apart.
#[derive(Clone, Debug)]
pub struct JarDependency {
    coordinate: Coordinate,
    force: bool,
    excludes: Vec<Exclude>,
    transitive: bool,
    apidocs: Option<String>,
    mutable: Option<bool>,
    artifacts: Vec<Artifact>,
    classifier: Option<String>,
    id: String,
    configurations: Vec<String>,
    declared_exclusives: BTreeMap<String, BTreeSet<String>>,
}

impl JarDependency {
    pub fn new(org: impl Into<String>, name: impl Into<String>, rev: Option<&str>) -> JarDependency {
        Self::from_coordinate(Coordinate::new(org, name, rev), JarOptions::default())
    }

    pub fn with_options(org: impl Into<String>, name: impl Into<String>, rev: Option<&str>, options: JarOptions) -> JarDependency {
        Self::from_coordinate(Coordinate::new(org, name, rev), options)
    }

    pub fn from_coordinate(coordinate: Coordinate, options: JarOptions) -> JarDependency {
        let JarOptions { force, ext, url, apidocs, type_, classifier, mutable, exclusives } = options;

        let id = coordinate.id();
        let mut result = JarDependency {
            coordinate,
            force,
            excludes: vec![],
            transitive: true,
            apidocs,
            mutable,
            artifacts: vec![],
            classifier: classifier.clone(),
            id,
            configurations: vec!["default".to_string()],
            declared_exclusives: BTreeMap::new(),
        };

        let present = |o: &Option<String>| o.as_deref().map_or(false, |s| !s.is_empty());
        if present(&ext) || present(&url) || present(&type_) || present(&classifier) {
            result.with_artifact(ArtifactSpec { name: None, type_, ext, url, configuration: None, classifier });
        }

        for (key, values) in exclusives {
            result.declared_exclusives.entry(key)
                .or_default()
                .extend(values);
        }

        result
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn org(&self) -> &str {
        &self.coordinate.org
    }

    pub fn name(&self) -> &str {
        &self.coordinate.name
    }

    /// `None` means the latest available revision
    pub fn rev(&self) -> Option<&str> {
        self.coordinate.rev.as_deref()
    }

    pub fn is_snapshot(&self) -> bool {
        self.coordinate.is_snapshot()
    }

    /// `{org}-{name}-{rev}`, fixed at construction
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn force(&self) -> bool {
        self.force
    }

    pub fn excludes(&self) -> &[Exclude] {
        &self.excludes
    }

    pub fn transitive(&self) -> bool {
        self.transitive
    }

    pub fn apidocs(&self) -> Option<&str> {
        self.apidocs.as_deref()
    }

    pub fn mutable(&self) -> Option<bool> {
        self.mutable
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn declared_exclusives(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.declared_exclusives
    }

    /// The requested configurations followed by those of the artifacts, without duplicates and in
    ///  order of first appearance. Always starts with 'default'.
    pub fn configurations(&self) -> Vec<&str> {
        let mut result: Vec<&str> = vec![];

        let artifact_confs = self.artifacts.iter()
            .filter_map(|a| a.conf())
            .filter(|conf| !conf.is_empty());

        for conf in self.configurations.iter().map(String::as_str).chain(artifact_confs) {
            if !result.contains(&conf) {
                result.push(conf);
            }
        }
        result
    }

    /// The Maven classifier: the explicit one if set, otherwise that of the only artifact. With
    ///  several artifacts and no explicit classifier, there is no single answer.
    pub fn classifier(&self) -> Result<Option<&str>, JarError> {
        if let Some(classifier) = self.classifier.as_deref().filter(|c| !c.is_empty()) {
            return Ok(Some(classifier));
        }

        match self.artifacts.as_slice() {
            [] => Ok(None),
            [artifact] => Ok(artifact.classifier()),
            artifacts => Err(JarError::AmbiguousClassifier {
                dependency: self.id.clone(),
                artifacts: artifacts.to_vec(),
            }),
        }
    }

    /// Adds a transitive dependency of this jar to the exclude list
    pub fn exclude(&mut self, org: impl Into<String>, name: Option<&str>) -> &mut JarDependency {
        let exclude = Exclude::new(org, name);
        trace!("{}: adding {}", self.id, exclude);
        self.excludes.push(exclude);
        self
    }

    /// Only the jar itself goes on the classpath, none of its dependencies
    pub fn intransitive(&mut self) -> &mut JarDependency {
        trace!("{}: intransitive", self.id);
        self.transitive = false;
        self
    }

    /// Requests the source jar as well. There is no check that one is actually published.
    pub fn with_sources(&mut self) -> &mut JarDependency {
        trace!("{}: with sources", self.id);
        self.configurations.push("sources".to_string());
        self
    }

    /// Requests the javadoc jar as well. There is no check that one is actually published.
    pub fn with_docs(&mut self) -> &mut JarDependency {
        trace!("{}: with docs", self.id);
        self.configurations.push("javadoc".to_string());
        self
    }

    /// Fetches an alternative artifact instead of the default one, or in addition to previously
    ///  added ones if called several times.
    pub fn with_artifact(&mut self, spec: ArtifactSpec) -> &mut JarDependency {
        let artifact = spec.into_artifact(&self.coordinate.name);
        trace!("{}: adding artifact {:?}", self.id, artifact);
        self.artifacts.push(artifact);
        self
    }

    pub fn cache_key(&self) -> String {
        let mut excludes = self.excludes.iter().collect::<Vec<_>>();
        excludes.sort();
        let excludes = excludes.iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        let mut key = format!("{}{}{}{}[{}]{}{}",
                              self.coordinate.org,
                              self.coordinate.name,
                              key_part(&self.coordinate.rev),
                              self.force,
                              excludes,
                              self.transitive,
                              self.mutable.map_or("None".to_string(), |m| m.to_string()),
        );

        let mut configurations = self.configurations.iter().collect::<Vec<_>>();
        configurations.sort();
        for conf in configurations {
            key.push_str(conf);
        }

        let mut artifacts = self.artifacts.iter()
            .map(|a| (a.name(), a.type_(), a.cache_key()))
            .collect::<Vec<_>>();
        artifacts.sort();
        for (_, _, artifact_key) in artifacts {
            key.push_str(&artifact_key);
        }

        key
    }

    /// hex encoded SHA-1 of the cache key, for caches that want fixed size keys
    pub fn cache_fingerprint(&self) -> String {
        hex::encode(Sha1::digest(self.cache_key().as_bytes()))
    }
}

impl PartialEq for JarDependency {
    fn eq(&self, other: &Self) -> bool {
        self.coordinate == other.coordinate
    }
}

impl Eq for JarDependency {}

impl Hash for JarDependency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coordinate.hash(state);
    }
}

impl Display for JarDependency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl BuildTarget for JarDependency {
    const KIND: TargetKind = TargetKind::Jar;

    /// A jar dependency is a leaf in the build graph.
    fn walk(&self, visit: &mut dyn FnMut(&Self), predicate: Option<&dyn Fn(&Self) -> bool>) {
        if predicate.map_or(true, |p| p(self)) {
            visit(self);
        }
    }
}

impl ExternalDependency for JarDependency {
    fn resolve(&self) -> Box<dyn Iterator<Item = &JarDependency> + '_> {
        Box::new(std::iter::once(self))
    }

    fn cache_key(&self) -> String {
        JarDependency::cache_key(self)
    }
}
