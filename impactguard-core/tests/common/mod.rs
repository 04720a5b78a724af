//! Common test utilities for integration tests
//!
//! This module provides:
//! - Wire-format frame builders and fragmenters
//! - Motion scenario generators (rest, riding, crash)
//! - Assertion helpers and a deterministic RNG

#![allow(dead_code)]

pub mod frames;
pub mod harness;
pub mod scenarios;
