//! Protocol tests: response frames and handler dispatch

mod dispatch_tests;
mod response_tests;
