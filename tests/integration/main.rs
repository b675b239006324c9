//! Integration tests for typed blueprint variables

mod adapter_contracts;
mod parameter_registry;
mod support;
