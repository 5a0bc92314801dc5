//! lumen-ask - natural-language question answering over a lighting product catalog.
//!
//! A question is translated by a language model into a structured query, checked
//! against the field catalog, executed as parameterized SQL, and the result is
//! handed back to the model to compose a plain-text answer.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod query;
