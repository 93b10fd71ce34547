//! Writing the rendered schema to disk.

use super::builder::PrismaSchema;
use crate::generator::errors::PrismaGeneratorError;
use crate::toolchain::SchemaFormatter;
use std::fs;
use std::path::Path;

/// Fixed block at the top of every generated file
pub const BANNER: &str = "\
//////////////////////////////////////////////////////////////////////////////////////////////
// DO NOT MODIFY THIS FILE                                                                  //
// This file is automatically generated by polyschema and should not be manually updated.   //
//////////////////////////////////////////////////////////////////////////////////////////////

";

/// Warning recorded when the formatter step fails
pub const FORMAT_FAILED_WARNING: &str = "Failed to format Prisma schema file";

/// Full file contents: banner followed by every declaration
pub fn render_schema_file(schema: &PrismaSchema) -> String {
    format!("{}{}\n", BANNER, schema)
}

/// Write the schema to `path`, creating parent directories, then run the
/// formatter if one is given.
///
/// Returns the warnings raised along the way. A formatter failure is one of
/// them; the unformatted file stays in place.
pub fn emit(
    schema: &PrismaSchema,
    path: &Path,
    formatter: Option<&dyn SchemaFormatter>,
) -> Result<Vec<String>, PrismaGeneratorError> {
    let mut warnings = Vec::new();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| PrismaGeneratorError::write_failed(path, e))?;
    }
    fs::write(path, render_schema_file(schema))
        .map_err(|e| PrismaGeneratorError::write_failed(path, e))?;
    log::info!("Wrote Prisma schema to {}", path.display());

    if let Some(formatter) = formatter {
        match formatter.format(path) {
            Ok(()) => log::info!("Formatted {}", path.display()),
            Err(e) => {
                log::warn!("{}: {}", FORMAT_FAILED_WARNING, e);
                warnings.push(FORMAT_FAILED_WARNING.to_string());
            }
        }
    }

    Ok(warnings)
}
