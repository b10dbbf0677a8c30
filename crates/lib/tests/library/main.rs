//! End-to-end tests for the compiler library.

mod common;
mod compile_tests;
mod scripts_tests;
