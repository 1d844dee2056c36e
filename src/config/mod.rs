//! Configuration models for the job system.

pub mod job_system;

pub use job_system::JobSystemConfig;
