//! Tests for the CLI runtime.

mod support;
mod unit;
