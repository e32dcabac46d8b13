use serde::{Deserialize, Serialize};

/// One physical artifact of a jar dependency, in the sense of an Ivy `<artifact>` element.
///
/// See: http://ant.apache.org/ivy/history/latest-milestone/ivyfile/artifact.html
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Artifact {
    name: String, // without revision
    type_: String,
    ext: Option<String>,
    conf: Option<String>, // '*' designates all public configurations
    url: Option<String>,
    classifier: Option<String>,
}

impl Artifact {
    pub fn new(
        name: impl Into<String>,
        type_: Option<String>,
        ext: Option<String>,
        conf: Option<String>,
        url: Option<String>,
        classifier: Option<String>,
    ) -> Artifact {
        Artifact {
            name: name.into(),
            type_: type_.filter(|t| !t.is_empty()).unwrap_or_else(|| "jar".to_string()),
            ext,
            conf,
            url,
            classifier,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The packaging type. This is usually the extension, but not necessarily: ivy files have
    ///  type 'ivy' and extension 'xml'.
    pub fn type_(&self) -> &str {
        &self.type_
    }

    pub fn ext(&self) -> Option<&str> {
        self.ext.as_deref()
    }

    pub fn conf(&self) -> Option<&str> {
        self.conf.as_deref()
    }

    /// set only if the artifact is not at its standard repository location
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    pub fn cache_key(&self) -> String {
        format!("{}{}{}{}{}{}",
                self.name,
                self.type_,
                key_part(&self.ext),
                key_part(&self.conf),
                key_part(&self.url),
                key_part(&self.classifier),
        )
    }
}

pub(crate) fn key_part(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}

/// The arguments to `JarDependency::with_artifact`. Every field is optional; the name defaults to
///  the name of the owning dependency and the type to 'jar'.
#[derive(PartialEq, Eq, Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub type_: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub configuration: Option<String>,
    #[serde(default)]
    pub classifier: Option<String>,
}

impl ArtifactSpec {
    pub fn name(mut self, name: impl Into<String>) -> ArtifactSpec {
        self.name = Some(name.into());
        self
    }

    pub fn type_(mut self, type_: impl Into<String>) -> ArtifactSpec {
        self.type_ = Some(type_.into());
        self
    }

    pub fn ext(mut self, ext: impl Into<String>) -> ArtifactSpec {
        self.ext = Some(ext.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> ArtifactSpec {
        self.url = Some(url.into());
        self
    }

    pub fn configuration(mut self, configuration: impl Into<String>) -> ArtifactSpec {
        self.configuration = Some(configuration.into());
        self
    }

    pub fn classifier(mut self, classifier: impl Into<String>) -> ArtifactSpec {
        self.classifier = Some(classifier.into());
        self
    }

    pub(crate) fn into_artifact(self, default_name: &str) -> Artifact {
        Artifact::new(
            self.name.filter(|n| !n.is_empty()).unwrap_or_else(|| default_name.to_string()),
            self.type_,
            self.ext,
            self.configuration,
            self.url,
            self.classifier,
        )
    }
}

#[cfg(test)]
mod test {
    use rstest::*;
    use super::*;

    #[rstest]
    #[case::absent(None, "jar")]
    #[case::empty(Some(""), "jar")]
    #[case::ivy(Some("ivy"), "ivy")]
    fn test_type_defaults_to_jar(#[case] type_: Option<&str>, #[case] expected: &str) {
        let artifact = Artifact::new("a", type_.map(str::to_string), Some("xml".to_string()), None, None, None);
        assert_eq!(artifact.type_(), expected);
        assert_eq!(artifact.ext(), Some("xml"));
    }

    #[rstest]
    #[case::absent(ArtifactSpec::default(), "finagle-core", "jar")]
    #[case::empty_name_and_type(ArtifactSpec::default().name("").type_(""), "finagle-core", "jar")]
    #[case::explicit(ArtifactSpec::default().name("finagle-native").type_("so"), "finagle-native", "so")]
    fn test_spec_defaults(#[case] spec: ArtifactSpec, #[case] expected_name: &str, #[case] expected_type: &str) {
        let artifact = spec.into_artifact("finagle-core");
        assert_eq!(artifact.name(), expected_name);
        assert_eq!(artifact.type_(), expected_type);
    }

    #[test]
    fn test_cache_key() {
        let artifact = Artifact::new("a", None, None, Some("*".to_string()), None, Some("tests".to_string()));
        assert_eq!(artifact.cache_key(), "ajarNone*Nonetests");

        let same = Artifact::new("a", Some("jar".to_string()), None, Some("*".to_string()), None, Some("tests".to_string()));
        assert_eq!(artifact.cache_key(), same.cache_key());

        let other = Artifact::new("a", None, None, Some("*".to_string()), None, Some("sources".to_string()));
        assert_ne!(artifact.cache_key(), other.cache_key());
    }

    #[test]
    fn test_debug_names_all_fields() {
        let debug = format!("{:?}", Artifact::new("a", None, None, None, None, Some("tests".to_string())));
        for field in ["name", "type_", "ext", "conf", "url", "classifier"] {
            assert!(debug.contains(field), "{} missing from {}", field, debug);
        }
    }

    #[test]
    fn test_spec_into_artifact() {
        let artifact = ArtifactSpec::default()
            .classifier("tests")
            .configuration("test")
            .into_artifact("finagle-core");

        assert_eq!(artifact.name(), "finagle-core");
        assert_eq!(artifact.type_(), "jar");
        assert_eq!(artifact.classifier(), Some("tests"));
        assert_eq!(artifact.conf(), Some("test"));
        assert_eq!(artifact.url(), None);

        let artifact = ArtifactSpec::default()
            .name("finagle-core-native")
            .type_("bundle")
            .ext("jar")
            .url("https://example.com/x.jar")
            .into_artifact("finagle-core");
        assert_eq!(artifact.name(), "finagle-core-native");
        assert_eq!(artifact.type_(), "bundle");
        assert_eq!(artifact.url(), Some("https://example.com/x.jar"));
    }

    #[test]
    fn test_spec_deserializes_type_field() {
        let spec: ArtifactSpec = serde_json::from_str(r#"{"type": "test-jar", "classifier": "tests"}"#).unwrap();
        assert_eq!(spec, ArtifactSpec::default().type_("test-jar").classifier("tests"));
    }
}
