//! Common types and utilities for the remap symbol renaming engine.
//!
//! This crate provides foundational types used across all remap crates:
//! - String interning (`Atom`, `Interner`, `ShardedInterner`)
//! - Class-file access flags (`AccessFlags`)
//! - Type/method descriptor utilities
//! - Centralized walk limits

// String interning for class name / descriptor deduplication
pub mod interner;
pub use interner::{Atom, Interner, ShardedInterner};

// Class-file access flags
pub mod flags;
pub use flags::AccessFlags;

// Descriptor string utilities
pub mod descriptor;

// Centralized limits and thresholds
pub mod limits;
