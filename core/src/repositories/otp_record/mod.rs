pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod memory;

pub use memory::InMemoryOtpRecordRepository;
pub use r#trait::OtpRecordRepository;

#[cfg(test)]
mod tests;
