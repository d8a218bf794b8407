//! Command layer behind the `atlas` binary.
//!
//! Every subcommand is a [`command::CommandRequest`] routed through
//! [`command::CommandHandler`]; the binary only parses flags and prints the
//! resulting [`command::CommandResponse`].

pub mod command;
