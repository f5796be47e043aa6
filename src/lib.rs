#![forbid(unsafe_code)]
//! stubgen: xUnit + Moq test scaffolds for C# sources
//!
//! stubgen scans C# files and writes one skeleton test class per class it finds: a subject field, `Mock<T>`
//! fields for interface-typed constructor dependencies, a setup constructor, and one failing `[Fact]` per
//! public method. The work is split into a pure engine (source text in, scaffold text out) and a concurrent
//! read → generate → write pipeline.
//!
//! ## Layout
//!
//! - [`extract`] - syntax tree → [`model`] values
//! - [`defaults`] - default-value literals for declared types
//! - [`generate`] - model → test source text
//! - [`engine`] - the two composed, shareable across threads
//! - [`pipeline`] - bounded, per-stage parallel file processing
//! - [`cli`] - argument handling and process exit codes
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `pipeline` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a logic error in stubgen itself, use `.expect("INVARIANT: reason")`
//!   with a clear explanation.
//!
//! ## Example
//!
//! ```rust
//! use stubgen::engine::GenerationEngine;
//!
//! let engine = GenerationEngine::default();
//! let artifacts = engine
//!     .process("namespace Shop { public class Cart { public int Count() { return 0; } } }")
//!     .unwrap();
//! assert_eq!(artifacts[0].target_name, "CartTests");
//! assert!(artifacts[0].source.contains("namespace Shop.Tests"));
//! ```

pub mod cli;
pub mod defaults;
pub mod engine;
pub mod extract;
pub mod generate;
pub mod model;
pub mod pipeline;

pub use engine::GenerationEngine;
pub use extract::{GenerationError, extract};
pub use generate::{GeneratorConfig, ImportPolicy, ScaffoldGenerator};
pub use model::{ClassModel, ExtractedUnit, GeneratedArtifact, MethodModel, NamespaceModel, ParameterModel, SourceUnit};
pub use pipeline::{CollisionPolicy, ConfigError, PipelineCoordinator, PipelineOptions, PipelineReport};
