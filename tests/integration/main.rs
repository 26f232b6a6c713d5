//! Integration tests

mod analyzer_test;
mod engine_test;
mod pipeline_test;
