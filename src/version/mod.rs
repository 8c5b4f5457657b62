//! Version resolution layer
//!
//! Turns version hints into concrete versions drawn from a catalog of
//! installable versions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Strategies │────▶│  Resolver   │◀────│   Catalog   │
//! │  (hints)    │     │ (precedence)│     │ (manifest)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │   Matcher   │
//!                     │ (patterns)  │
//!                     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: `VersionCatalog` trait and the manifest-backed implementation
//! - [`error`]: Error type for matching and resolution
//! - [`matcher`]: Pattern matching, feature-line roll-forward, latest patch
//! - [`pattern`]: Version pattern grammar (`6.7.x`, `6.x`, `2.0.*`)
//! - [`resolver`]: Precedence driver over ordered version specifications
//! - [`strategy`]: Hint strategy trait and request builder
//! - [`strategies`]: Per-source hint strategies

pub mod catalog;
pub mod error;
pub mod matcher;
pub mod pattern;
pub mod resolver;
pub mod strategies;
pub mod strategy;
