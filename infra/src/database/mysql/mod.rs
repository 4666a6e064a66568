//! MySQL repository implementations

pub mod consultant_repository_impl;
pub mod otp_record_repository_impl;

pub use consultant_repository_impl::MySqlConsultantRepository;
pub use otp_record_repository_impl::MySqlOtpRecordRepository;
