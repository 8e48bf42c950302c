//! Integration tests for momentum-tracker

mod config_test;
mod detector_test;
mod replay_test;
