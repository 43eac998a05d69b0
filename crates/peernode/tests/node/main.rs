//! Node construction tests: configuration, identity and bootstrap resolution

mod bootstrap_tests;
mod config_tests;
mod identity_tests;
