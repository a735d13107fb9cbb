//! Command handlers for the packgen CLI

pub mod generate;
pub mod metadata;
pub mod pack_log;
pub mod scan;
