//! Shared test harness modules for the tilewright CLI.

use super::*;

mod helpers;
mod steps;
mod unit;
