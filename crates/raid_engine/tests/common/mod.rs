//! Shared test utilities for the raid engine integration tests.
//!
//! Imported by every test binary with `mod common;`.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;
