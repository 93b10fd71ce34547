//! Installed target tool version detection.

use regex::Regex;
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

/// Oldest target tool release the generated schema is known to work with
pub const PRISMA_MINIMUM_VERSION: &str = "5.0.0";

/// `major.minor.patch` with an optional pre-release tag (`5.1.0-dev.3`)
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*v?(\d+)\.(\d+)\.(\d+)(?:-([0-9A-Za-z.-]+))?(?:\+[0-9A-Za-z.-]+)?\s*$")
        .expect("version regex is valid")
});

/// A parsed release version. Pre-releases order before their release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<String>,
}

impl FromStr for ToolVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = VERSION_REGEX
            .captures(s)
            .ok_or_else(|| format!("not a version: '{}'", s))?;
        let number = |i: usize| -> Result<u64, String> {
            caps[i]
                .parse()
                .map_err(|e| format!("bad version component in '{}': {}", s, e))
        };
        Ok(ToolVersion {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            pre: caps.get(4).map(|m| m.as_str().to_string()),
        })
    }
}

impl Ord for ToolVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => compare_pre_release(a, b),
            })
    }
}

/// Dot-separated identifiers, left to right. Numeric ones compare by value
/// and sort below alphanumeric ones; a shorter prefix sorts first.
fn compare_pre_release(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match (x.parse::<u64>(), y.parse::<u64>()) {
                // text breaks ties like `01` and `1` so the order agrees with `Eq`
                (Ok(m), Ok(n)) => m.cmp(&n).then_with(|| x.cmp(y)),
                (Ok(_), Err(_)) => Ordering::Less,
                (Err(_), Ok(_)) => Ordering::Greater,
                (Err(_), Err(_)) => x.cmp(y),
            },
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

impl PartialOrd for ToolVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

/// Warning text when `installed` is older than [`PRISMA_MINIMUM_VERSION`]
pub fn version_warning(installed: &str) -> Option<String> {
    let Ok(version) = installed.parse::<ToolVersion>() else {
        log::debug!("Ignoring unparseable tool version '{}'", installed);
        return None;
    };
    let minimum: ToolVersion = PRISMA_MINIMUM_VERSION.parse().ok()?;
    (version < minimum).then(|| {
        format!(
            "Prisma version \"{}\" or higher is required. Detected version is \"{}\".",
            PRISMA_MINIMUM_VERSION, installed
        )
    })
}

/// Reports the installed target tool version, if any
pub trait VersionSource {
    fn installed_version(&self) -> Option<String>;
}

/// A version source with a fixed answer
#[derive(Debug, Clone, Default)]
pub struct StaticVersion(pub Option<String>);

impl VersionSource for StaticVersion {
    fn installed_version(&self) -> Option<String> {
        self.0.clone()
    }
}

#[derive(Deserialize)]
struct PackageManifest {
    version: Option<String>,
}

/// Reads `node_modules/prisma/package.json` under a project root, falling
/// back to `node_modules/@prisma/client/package.json`
#[derive(Debug, Clone)]
pub struct NodeModulesVersion {
    root: PathBuf,
}

impl NodeModulesVersion {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        NodeModulesVersion { root: root.into() }
    }

    fn read_manifest(path: &Path) -> Option<String> {
        let contents = fs::read_to_string(path).ok()?;
        match serde_json::from_str::<PackageManifest>(&contents) {
            Ok(manifest) => manifest.version,
            Err(e) => {
                log::debug!("Ignoring malformed manifest {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl VersionSource for NodeModulesVersion {
    fn installed_version(&self) -> Option<String> {
        ["prisma", "@prisma/client"].iter().find_map(|package| {
            let manifest = self.root.join("node_modules").join(package).join("package.json");
            Self::read_manifest(&manifest)
        })
    }
}
