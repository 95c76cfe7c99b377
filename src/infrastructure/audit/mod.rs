//! Audit trail adapters.

pub mod fs_sink;

pub use fs_sink::FsAuditSink;
