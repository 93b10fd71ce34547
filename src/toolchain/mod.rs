//! Collaborators outside the compiler proper: the installed target tool
//! version and the external formatter.

pub mod errors;
pub mod formatter;
pub mod version;

pub use errors::FormatError;
pub use formatter::{CommandFormatter, SchemaFormatter};
pub use version::{
    version_warning, NodeModulesVersion, StaticVersion, ToolVersion, VersionSource,
    PRISMA_MINIMUM_VERSION,
};
