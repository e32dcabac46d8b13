use bitflags::bitflags;

use crate::targets::jar_dependency::JarDependency;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const LABELS  = 0b00000001;
        const JAR     = 0b00000010;
        const SOURCES = 0b00000100;
    }
}

/// The kinds of nodes a build graph is made of. Each kind has a fixed capability set, so callers
///  can ask what a node supports instead of probing methods that only ever answer 'no'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Source,
    Jar,
}

impl TargetKind {
    pub fn capabilities(self) -> Capabilities {
        match self {
            TargetKind::Source => Capabilities::LABELS | Capabilities::SOURCES,
            TargetKind::Jar => Capabilities::JAR,
        }
    }
}

pub trait BuildTarget: Sized {
    const KIND: TargetKind;

    fn capabilities(&self) -> Capabilities {
        Self::KIND.capabilities()
    }

    fn labels(&self) -> &[String] {
        &[]
    }

    fn has_label(&self, label: &str) -> bool {
        self.capabilities().contains(Capabilities::LABELS)
            && self.labels().iter().any(|l| l == label)
    }

    fn is_jar(&self) -> bool {
        self.capabilities().contains(Capabilities::JAR)
    }

    /// Calls `visit` for this node and the nodes below it, skipping nodes for which a given
    ///  `predicate` returns false.
    fn walk(&self, visit: &mut dyn FnMut(&Self), predicate: Option<&dyn Fn(&Self) -> bool>);
}

/// Something that expands to a set of concrete jar dependencies during resolution
pub trait ExternalDependency {
    fn resolve(&self) -> Box<dyn Iterator<Item = &JarDependency> + '_>;

    /// opaque, only ever compared for equality
    fn cache_key(&self) -> String;
}

#[cfg(test)]
mod test {
    use rstest::*;
    use super::*;

    #[rstest]
    #[case::source(TargetKind::Source, true, false)]
    #[case::jar(TargetKind::Jar, false, true)]
    fn test_static_capabilities(#[case] kind: TargetKind, #[case] labels: bool, #[case] jar: bool) {
        assert_eq!(kind.capabilities().contains(Capabilities::LABELS), labels);
        assert_eq!(kind.capabilities().contains(Capabilities::JAR), jar);
    }

    struct LabelledSource {
        labels: Vec<String>,
    }

    impl BuildTarget for LabelledSource {
        const KIND: TargetKind = TargetKind::Source;

        fn labels(&self) -> &[String] {
            &self.labels
        }

        fn walk(&self, visit: &mut dyn FnMut(&Self), predicate: Option<&dyn Fn(&Self) -> bool>) {
            if predicate.map_or(true, |p| p(self)) {
                visit(self);
            }
        }
    }

    #[test]
    fn test_labels_only_count_for_labelled_kinds() {
        let source = LabelledSource { labels: vec!["exclusive".to_string()] };
        assert!(source.has_label("exclusive"));
        assert!(!source.has_label("other"));
        assert!(!source.is_jar());
    }
}
