//! End-to-end conformance suite for the document engine.
//!
//! Exercises the full stack through the public API: action protocol,
//! schema compilation and caching, record store semantics, pagination,
//! and namespace isolation.

mod lifecycle;
mod pagination;
mod protocol;
