use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::anyhow;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref COORDINATE_REGEX: Regex = Regex::new(r"^([^:\s]+):([^:\s]+)(?::([^:\s]+))?$").unwrap();
}

/// The `(org, name, rev)` triple identifying a dependency in a Maven style repository. An absent
///  `rev` means "whatever is latest at resolution time".
#[derive(PartialEq, Eq, Hash, Clone, Debug, PartialOrd, Ord)]
pub struct Coordinate {
    pub org: String,
    pub name: String,
    pub rev: Option<String>,
}

impl Coordinate {
    pub fn new(org: impl Into<String>, name: impl Into<String>, rev: Option<&str>) -> Coordinate {
        Coordinate {
            org: org.into(),
            name: name.into(),
            rev: rev.map(str::to_string),
        }
    }

    pub fn is_snapshot(&self) -> bool {
        self.rev.as_deref()
            .map(|rev| rev.ends_with("-SNAPSHOT"))
            .unwrap_or(false)
    }

    /// `{org}-{name}-{rev}`, with `None` standing in for an absent revision
    pub fn id(&self) -> String {
        format!("{}-{}-{}", self.org, self.name, self.rev.as_deref().unwrap_or("None"))
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.rev {
            Some(rev) => write!(f, "{}:{}:{}", self.org, self.name, rev),
            None => write!(f, "{}:{}", self.org, self.name),
        }
    }
}

impl FromStr for Coordinate {
    type Err = anyhow::Error;

    /// accepts `org:name` and `org:name:rev`
    fn from_str(s: &str) -> anyhow::Result<Coordinate> {
        let captures = COORDINATE_REGEX.captures(s.trim())
            .ok_or_else(|| anyhow!("not a valid coordinate, expected 'org:name' or 'org:name:rev': {:?}", s))?;

        Ok(Coordinate {
            org: captures[1].to_string(),
            name: captures[2].to_string(),
            rev: captures.get(3).map(|m| m.as_str().to_string()),
        })
    }
}
