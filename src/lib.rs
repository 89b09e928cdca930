//! Shellform - shell-correct formatting of paths and arguments for
//! build-system generators
//!
//! This crate provides the output layer of a build-file generator: turning
//! raw command arguments into tokens that a target shell, make tool, or IDE
//! project file will parse back into exactly the original string, and turning
//! absolute paths into relative paths across a source/binary directory
//! topology.

pub mod convert;
pub mod escape;
pub mod paths;
pub mod util;

pub use convert::{Converter, EscapeOptions, GeneratorEnv, OutputFormat};
pub use escape::{ShellDialect, WrapQuotes};
pub use paths::{PathRelativizer, TopRelation};
