//! CLI infrastructure for the tic-tac-toe search toolkit
//!
//! This module provides the command-line interface for playing strategies
//! against each other, running experiment suites and inspecting positions.

pub mod commands;
pub mod config;
pub mod output;
