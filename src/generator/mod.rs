//! # Prisma Schema Generator
//!
//! Walks the resolved declarations once, in source order, and builds the
//! target schema. Each model goes through its own field translation first
//! and then four follow-up passes that only touch that model's block:
//!
//! 1. delegate base relations (physical)
//! 2. concrete-to-base relations (physical)
//! 3. polymorphic relation widening (logical)
//! 4. naming of relations inherited through delegates (logical)
//!
//! The generator owns the truncation memory, so one instance must be used
//! for exactly one compile.

mod attribute;
mod declarations;
mod delegate;
mod disambiguate;
pub mod errors;
mod field;
mod model;
mod polymorphic;

use crate::config::{CompilerConfig, GenerationMode};
use crate::model::ast::Declaration;
use crate::model::graph::Schema;
use crate::model::printer::{ModelPrinter, QuoteStyle};
use crate::prisma::builder::PrismaSchema;
use crate::prisma::emit::emit;
use crate::toolchain::{
    version_warning, CommandFormatter, NodeModulesVersion, SchemaFormatter, VersionSource,
};
use crate::utils::aux_naming::NameTruncator;
use std::cell::OnceCell;
use std::path::PathBuf;

pub use errors::PrismaGeneratorError;

/// Result of a successful compile
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOutcome {
    /// Path the schema was written to
    pub output: PathBuf,
    /// Non-fatal problems, in the order they were raised
    pub warnings: Vec<String>,
}

pub struct PrismaSchemaGenerator<'a> {
    schema: &'a Schema,
    config: &'a CompilerConfig,
    mode: GenerationMode,
    names: NameTruncator,
    version_source: Box<dyn VersionSource + 'a>,
    formatter: Option<Box<dyn SchemaFormatter + 'a>>,
    tool_version: OnceCell<Option<String>>,
    /// Prints non-target attributes into `///` lines
    doc_printer: ModelPrinter,
    /// Prints field reference arguments
    arg_printer: ModelPrinter,
}

impl<'a> PrismaSchemaGenerator<'a> {
    pub fn new(schema: &'a Schema, config: &'a CompilerConfig) -> Self {
        let formatter: Option<Box<dyn SchemaFormatter + 'a>> = if config.format {
            Some(Box::new(CommandFormatter::new(
                config.formatter_command.clone(),
                config.formatter_timeout(),
            )))
        } else {
            None
        };

        PrismaSchemaGenerator {
            schema,
            config,
            mode: config.mode,
            names: NameTruncator::new(config.identifier_max_length),
            version_source: Box::new(NodeModulesVersion::new(config.project_root.clone())),
            formatter,
            tool_version: OnceCell::new(),
            doc_printer: ModelPrinter::new(QuoteStyle::Single),
            arg_printer: ModelPrinter::new(QuoteStyle::Double),
        }
    }

    /// Replace the installed-version lookup
    pub fn with_version_source(mut self, source: impl VersionSource + 'a) -> Self {
        self.version_source = Box::new(source);
        self.tool_version = OnceCell::new();
        self
    }

    /// Replace the formatter; ignored when formatting is disabled in the config
    pub fn with_formatter(mut self, formatter: impl SchemaFormatter + 'a) -> Self {
        if self.config.format {
            self.formatter = Some(Box::new(formatter));
        }
        self
    }

    /// Installed target tool version, looked up at most once
    fn tool_version(&self) -> Option<&str> {
        self.tool_version
            .get_or_init(|| self.version_source.installed_version())
            .as_deref()
    }

    /// Translate every declaration into a target schema without writing it
    pub fn build(&mut self) -> Result<PrismaSchema, PrismaGeneratorError> {
        let schema = self.schema;
        let mut prisma = PrismaSchema::new();

        for decl in schema.declarations() {
            log::debug!("Generating {} ({} mode)", decl.name(), self.mode);
            match decl {
                Declaration::DataSource(ds) => self.generate_data_source(&mut prisma, ds)?,
                Declaration::Generator(gen) => self.generate_generator(&mut prisma, gen)?,
                Declaration::Enum(e) => self.generate_enum(&mut prisma, e)?,
                Declaration::Model(m) => self.generate_model(&mut prisma, m)?,
            }
        }

        Ok(prisma)
    }

    /// Compile, write the output file and run the formatter.
    ///
    /// Nothing is written unless the whole schema translated successfully.
    pub fn generate(mut self) -> Result<GenerateOutcome, PrismaGeneratorError> {
        let output = self
            .config
            .output
            .clone()
            .ok_or(PrismaGeneratorError::MissingOutputPath)?;

        let mut warnings = Vec::new();
        if let Some(warning) = self.tool_version().and_then(version_warning) {
            log::warn!("{}", warning);
            warnings.push(warning);
        }

        let prisma = self.build()?;
        warnings.extend(emit(&prisma, &output, self.formatter.as_deref())?);

        Ok(GenerateOutcome { output, warnings })
    }
}
