//! Command-line interface support for the `graphkit` binary.

pub mod commands;
