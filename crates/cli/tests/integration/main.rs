//! Integration tests for the mcfc binary.

mod common;
mod pack_tests;
