//! Polyschema - schema compiler for delegate-polymorphic data models
//!
//! This crate turns a validated domain data model into a Prisma schema:
//! - Attribute resolution and inheritance merge over the input model
//! - Physical output linking delegate bases to their concrete tables
//! - Logical output widening polymorphic relations per concrete subtype
//! - Deterministic, collision-free auxiliary identifiers

pub mod utils;

pub mod config;
pub mod generator;
pub mod model;
pub mod prisma;
pub mod toolchain;

pub use config::{CompilerConfig, GenerationMode};
pub use generator::{GenerateOutcome, PrismaGeneratorError, PrismaSchemaGenerator};
pub use model::{ModelError, Schema};
