//! # licensing-parser
//!
//! Turns a numbered licensing-requirements specification (plain UTF-8 text lines) into a
//! tree of sections, and filters that tree against a business profile.
//!
//! File Layout
//!
//! The work is split into the stages a line travels through, each in its own module:
//!
//! src/licensing
//!   ├── lexing       Line normalization and section-number recognition
//!   ├── context      Numbering context state machine (main body, annex, sub-annex)
//!   ├── building     Section tree builder and body truncation
//!   ├── bounds       Area / seat / facility bound extraction (declarative rule tables)
//!   ├── sorting      Numeric ordering of the forest
//!   ├── matching     Business profile relevance and tree pruning
//!   └── formats      json / yaml / treeviz serialization
//!
//! Most callers only need [`licensing::pipeline::parse_document`] and
//! [`licensing::matching::match_sections`].
//!
//! For testing guidelines, see the [testing module](licensing::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod licensing;
