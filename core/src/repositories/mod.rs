//! Repository interfaces for persistence, plus in-memory implementations
//! used by tests and by the `memory` storage backend.

pub mod consultant;
pub mod otp_record;

pub use consultant::{ConsultantRepository, InMemoryConsultantRepository};
pub use otp_record::{InMemoryOtpRecordRepository, OtpRecordRepository};
