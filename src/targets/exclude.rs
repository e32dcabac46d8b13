use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Omits a transitive dependency during resolution: every artifact of `org`, or only `org:name`
///  if a name is given.
#[derive(PartialEq, Eq, Hash, Clone, Debug, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Exclude {
    pub org: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Exclude {
    pub fn new(org: impl Into<String>, name: Option<&str>) -> Exclude {
        Exclude {
            org: org.into(),
            name: name.map(str::to_string),
        }
    }
}

impl Display for Exclude {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Exclude({}, {})", self.org, self.name.as_deref().unwrap_or("None"))
    }
}
