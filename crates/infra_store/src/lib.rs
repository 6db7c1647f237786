//! Storage Infrastructure Layer
//!
//! This crate provides the record store adapters behind
//! [`core_kernel::RecordStore`]. The clinic keeps its collections in process
//! memory; a durable adapter is a drop-in replacement with identical
//! semantics.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use infra_store::InMemoryStore;
//!
//! let patients: Arc<dyn RecordStore<Patient>> = Arc::new(InMemoryStore::new("patients"));
//! ```

pub mod memory;

pub use memory::InMemoryStore;
