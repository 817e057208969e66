//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - Error classification, the unified [`error::app_error::AppError`] and its conversions
//! - Typed UUID identifiers

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
