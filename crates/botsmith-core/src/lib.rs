//! Wizard engine for the botsmith agent configuration flow.
//!
//! This crate is a pure in-memory state machine: two independently
//! validated form sections driven by a navigation controller, plus a
//! cancellable background import that writes into the knowledge section.
//! It defines the collaborator "ports" (`ConfigSink`, `ContentFetcher`)
//! that the embedding application implements -- it never performs IO of
//! its own. A presentation layer renders the exposed state and forwards
//! user intents as calls into `wizard`.

pub mod wizard;
