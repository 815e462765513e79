//! Integration test harness.
//!
//! Drives the real loops against recording mock ports — no hardware, no
//! on-disk database.

mod loop_tests;
mod mock_hw;
mod server_tests;
