//! Shared pieces of the farm ledger contract suite.
//!
//! This crate provides:
//! - [`interfaces`]: client traits for the collaborators the ledger calls out
//!   to (the reward cashbox and the farming ticket window).
//! - [`testutils`] (behind the `testutils` feature): in-memory doubles for
//!   those collaborators, used by unit, property, and fuzz tests.

#![no_std]

pub mod interfaces;
#[cfg(feature = "testutils")]
pub mod testutils;

pub use interfaces::*;
