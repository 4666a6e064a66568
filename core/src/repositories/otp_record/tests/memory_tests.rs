//! Unit tests for the in-memory OTP record repository

use chrono::Utc;

use crate::domain::entities::OtpRecord;
use crate::errors::DomainError;
use crate::repositories::otp_record::{InMemoryOtpRecordRepository, OtpRecordRepository};

#[tokio::test]
async fn test_upsert_replaces_existing_record() {
    let repo = InMemoryOtpRecordRepository::new();
    let now = Utc::now();

    let first = OtpRecord::new("9876543210".to_string(), "111111".to_string(), now);
    repo.upsert(&first).await.unwrap();

    let mut second = first.clone();
    second.resend("222222".to_string(), now);
    repo.upsert(&second).await.unwrap();

    assert_eq!(repo.len().await, 1);
    let stored = repo.find_by_mobile("9876543210").await.unwrap().unwrap();
    assert_eq!(stored.code, "222222");
}

#[tokio::test]
async fn test_delete_reports_presence() {
    let repo = InMemoryOtpRecordRepository::new();
    let record = OtpRecord::new("9876543210".to_string(), "111111".to_string(), Utc::now());
    repo.upsert(&record).await.unwrap();

    assert!(repo.delete("9876543210").await.unwrap());
    assert!(!repo.delete("9876543210").await.unwrap());
    assert!(repo.find_by_mobile("9876543210").await.unwrap().is_none());
}

#[tokio::test]
async fn test_failing_writes_leave_store_untouched() {
    let repo = InMemoryOtpRecordRepository::new();
    repo.set_fail_writes(true);

    let record = OtpRecord::new("9876543210".to_string(), "111111".to_string(), Utc::now());
    let result = repo.upsert(&record).await;

    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert_eq!(repo.len().await, 0);
}
