//! A synchronous, in-process URL filtering engine in the AdBlock/EasyList
//! style: compile filter list text into rules, then decide block/allow
//! for a (request URL, document URL, resource type) triple.
//!
//! The crate is organized bottom-up: [`url`] holds the canonicalization
//! primitives, [`rule`] the compiled rule representation, [`parser`]
//! turns filter list text into rules, [`engine`] holds the compiled
//! corpus and answers queries, and [`facade`] exposes a process-wide
//! singleton for embedding across a language boundary (see [`ffi`] and,
//! on Android, [`jni`]).

pub mod default_list;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod facade;
pub mod jni;
pub mod parser;
pub mod rule;
pub mod url;

pub use engine::{EngineConfig, FilterEngine};
pub use error::{FilterError, Result};
pub use rule::{PatternForm, ResourceType, Rule, RuleKind};
