//! Foundation types for GraphQL codemods.
//!
//! This crate provides shared types used across the codemod stack.
//! It has zero external dependencies, making it suitable as a foundation layer.
//!
//! # Type Categories
//!
//! - **File types**: [`Language`]
//! - **Position types**: [`OffsetRange`], [`Position`], [`LineIndex`]
//! - **Edit types**: [`TextEdit`], [`apply_edits`]
//! - **Diagnostic types**: [`Diagnostic`], [`Severity`]

mod diagnostic;
mod edits;
mod file;
mod position;

pub use diagnostic::{Diagnostic, Severity};
pub use edits::{apply_edits, AppliedEdits, TextEdit};
pub use file::Language;
pub use position::{LineIndex, OffsetRange, Position};
