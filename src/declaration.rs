//! Jar dependencies as declared in a JSON build file.
//!
//! ```json
//! [
//!   {
//!     "org": "com.twitter", "name": "finagle-core", "rev": "6.0.0",
//!     "excludes": [{"org": "org.slf4j"}],
//!     "sources": true,
//!     "artifacts": [{"classifier": "tests", "configuration": "test"}]
//!   }
//! ]
//! ```

use std::collections::BTreeMap;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::targets::artifact::ArtifactSpec;
use crate::targets::exclude::Exclude;
use crate::targets::jar_dependency::{JarDependency, JarOptions};

#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct JarDeclaration {
    pub org: String,
    pub name: String,
    #[serde(default)]
    pub rev: Option<String>,
    #[serde(flatten)]
    pub options: JarOptions,
    #[serde(default)]
    pub excludes: Vec<Exclude>,
    #[serde(default = "default_transitive")]
    pub transitive: bool,
    #[serde(default)]
    pub sources: bool,
    #[serde(default)]
    pub docs: bool,
    #[serde(default)]
    pub artifacts: Vec<ArtifactSpec>,
    /// keys not consumed by any field above; must be empty
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

fn default_transitive() -> bool {
    true
}

impl JarDeclaration {
    pub fn into_dependency(self) -> JarDependency {
        let mut result = JarDependency::with_options(self.org, self.name, self.rev.as_deref(), self.options);

        for exclude in self.excludes {
            result.exclude(exclude.org, exclude.name.as_deref());
        }
        if !self.transitive {
            result.intransitive();
        }
        if self.sources {
            result.with_sources();
        }
        if self.docs {
            result.with_docs();
        }
        for artifact in self.artifacts {
            result.with_artifact(artifact);
        }

        result
    }
}

/// Parses a JSON array of declarations
pub fn parse_declarations(json: &str) -> anyhow::Result<Vec<JarDependency>> {
    let declarations: Vec<JarDeclaration> = serde_json::from_str(json)
        .context("invalid jar dependency declarations")?;

    for declaration in &declarations {
        if !declaration.unknown.is_empty() {
            let keys = declaration.unknown.keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(anyhow!("unknown keys in declaration of {}:{}: {}", declaration.org, declaration.name, keys));
        }
    }

    debug!("parsed {} jar dependency declarations", declarations.len());

    Ok(declarations.into_iter()
        .map(JarDeclaration::into_dependency)
        .collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::targets::capability::ExternalDependency;

    #[test]
    fn test_minimal_declaration() {
        let deps = parse_declarations(r#"[{"org": "junit", "name": "junit"}]"#).unwrap();

        assert_eq!(deps, vec![JarDependency::new("junit", "junit", None)]);
        assert!(deps[0].transitive());
        assert!(deps[0].artifacts().is_empty());
        assert_eq!(deps[0].configurations(), vec!["default"]);
    }

    #[test]
    fn test_full_declaration() {
        let json = r#"[{
            "org": "com.twitter",
            "name": "finagle-core",
            "rev": "6.0.0",
            "force": true,
            "apidocs": "https://twitter.github.io/finagle/docs/",
            "mutable": false,
            "type": "bundle",
            "ext": "jar",
            "exclusives": {"scala": ["2.10"]},
            "excludes": [{"org": "org.slf4j"}, {"org": "log4j", "name": "log4j"}],
            "transitive": false,
            "sources": true,
            "docs": true,
            "artifacts": [{"classifier": "tests", "configuration": "test"}]
        }]"#;

        let deps = parse_declarations(json).unwrap();
        assert_eq!(deps.len(), 1);
        let dep = &deps[0];

        assert_eq!(dep.rev(), Some("6.0.0"));
        assert!(dep.force());
        assert_eq!(dep.apidocs(), Some("https://twitter.github.io/finagle/docs/"));
        assert_eq!(dep.mutable(), Some(false));
        assert!(!dep.transitive());
        assert_eq!(dep.excludes(), &[Exclude::new("org.slf4j", None), Exclude::new("log4j", Some("log4j"))]);
        assert_eq!(dep.configurations(), vec!["default", "sources", "javadoc", "test"]);
        assert_eq!(dep.artifacts().len(), 2);
        assert_eq!(dep.artifacts()[0].type_(), "bundle");
        assert!(dep.classifier().is_err());
        assert_eq!(dep.declared_exclusives()["scala"].iter().collect::<Vec<_>>(), vec!["2.10"]);
    }

    #[test]
    fn test_declaration_matches_builder_calls() {
        let declared = parse_declarations(r#"[{
            "org": "org.a", "name": "b", "rev": "1.0",
            "excludes": [{"org": "org.c"}],
            "docs": true,
            "artifacts": [{"classifier": "tests"}]
        }]"#).unwrap();

        let mut built = JarDependency::new("org.a", "b", Some("1.0"));
        built.with_artifact(ArtifactSpec::default().classifier("tests"))
            .with_docs()
            .exclude("org.c", None);

        assert_eq!(declared[0].cache_key(), ExternalDependency::cache_key(&built));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = parse_declarations(r#"[{"org": "junit", "name": "junit", "rev": "4.12", "sorces": true}]"#);

        let message = result.unwrap_err().to_string();
        assert!(message.contains("sorces"), "{}", message);
        assert!(message.contains("junit:junit"), "{}", message);
    }

    #[test]
    fn test_repeated_exclusive_tags_collapse() {
        let deps = parse_declarations(r#"[{
            "org": "org.a", "name": "b",
            "exclusives": {"scala": ["2.11", "2.10", "2.11"]}
        }]"#).unwrap();

        let scala = deps[0].declared_exclusives()["scala"].iter().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(scala, vec!["2.10", "2.11"]);
    }

    #[test]
    fn test_invalid_declarations() {
        assert!(parse_declarations("{}").is_err());
        assert!(parse_declarations(r#"[{"org": "junit"}]"#).is_err());
        assert!(parse_declarations(r#"[{"org": "junit", "name": "junit", "artifacts": [{"nme": "x"}]}]"#).is_err());
    }
}
