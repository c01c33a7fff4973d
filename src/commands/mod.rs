//! Command implementations for compsync

pub mod sync;
