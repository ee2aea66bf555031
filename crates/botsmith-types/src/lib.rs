//! Shared domain types for the botsmith configuration wizard.
//!
//! This crate contains the wizard's data model -- step identifiers, the
//! personality and knowledge section data, status enums for the import
//! dialog flow, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod error;
pub mod wizard;
