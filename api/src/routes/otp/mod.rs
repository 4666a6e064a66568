//! OTP route handlers
//!
//! - Requesting a code over WhatsApp
//! - Verifying a code
//! - Resetting a consultant password with a verified code

pub mod request_otp;
pub mod reset_password;
pub mod verify_otp;

use std::sync::Arc;

use actix_web::web;

use co_core::repositories::{ConsultantRepository, OtpRecordRepository};
use co_core::services::{MessagingGatewayTrait, OtpService, PasswordResetService};

pub use request_otp::request_otp;
pub use reset_password::reset_password;
pub use verify_otp::verify_otp;

/// Application state that holds shared services
pub struct AppState<G, R, C>
where
    G: MessagingGatewayTrait + ?Sized,
    R: OtpRecordRepository + ?Sized,
    C: ConsultantRepository + ?Sized,
{
    pub otp_service: Arc<OtpService<G, R>>,
    pub password_reset: Arc<PasswordResetService<G, R, C>>,
}

/// Register the `/otp` scope
pub fn configure<G, R, C>(cfg: &mut web::ServiceConfig)
where
    G: MessagingGatewayTrait + ?Sized + 'static,
    R: OtpRecordRepository + ?Sized + 'static,
    C: ConsultantRepository + ?Sized + 'static,
{
    cfg.service(
        web::scope("/otp")
            .route("/request", web::post().to(request_otp::<G, R, C>))
            .route("/verify", web::post().to(verify_otp::<G, R, C>))
            .route("/password-reset", web::post().to(reset_password::<G, R, C>)),
    );
}
