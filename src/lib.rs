//! Analytics and retrieval engine for structured wedding-planning journals.
//!
//! Vowlog works on journal entries that an upstream extraction step has already
//! turned into structured records (vendors, costs, dates, tasks, sentiment,
//! themes, and optionally an embedding of the text). Over a collection of those
//! records it:
//!
//! | Component | Output |
//! |-----------|--------|
//! | [`analysis::ContradictionDetector`] | budget, timeline, and vendor-booking conflicts |
//! | [`analysis::InsightGenerator`] | sentiment trend, spending, task load, recurring themes |
//! | [`analysis::NextStepPlanner`] | prioritized actions from the latest entry |
//! | [`retrieval::SemanticRetriever`] | cosine-ranked search and prompt context blocks |
//!
//! Every component is a pure computation over a borrowed `&[Entry]`. The only
//! I/O is the query embedding, which goes through an injected
//! [`embedding::EmbeddingProvider`].
//!
//! The `vowlog` binary exposes the same operations as an MCP server (stdio or
//! Streamable HTTP) and as CLI subcommands over JSON files.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`journal`]: Entry model with lenient field parsing, and input loading
//! - [`analysis`]: Contradictions, insights, and next steps
//! - [`embedding`]: Embedding provider trait and the OpenAI-compatible client
//! - [`retrieval`]: Similarity ranking, context rendering, contradiction flags

pub mod analysis;
pub mod config;
pub mod embedding;
pub mod journal;
pub mod retrieval;
