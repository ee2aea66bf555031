//! The configuration wizard: step validation, form state, navigation,
//! the website import flow, and the dialog guarding it.
//!
//! Control flow: `WizardController` drives which step is active and gates
//! forward navigation on that step's validation. `DialogController`
//! mediates starting and cancelling an import, which on success writes
//! into the knowledge step's form. Final submission validates every step
//! and hands the aggregated payload to a `ConfigSink`.

pub mod controller;
pub mod defaults;
pub mod dialog;
pub mod form;
pub mod import;
pub mod schema;
