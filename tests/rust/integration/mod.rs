//! Integration tests - full compiles through the public API
//!
//! Each test loads an inline model document, runs the generator in one or
//! both modes and checks the rendered Prisma schema or the written file.

mod generate_output_tests;
mod polymorphic_relation_tests;
