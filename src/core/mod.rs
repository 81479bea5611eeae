//! Core domain layer containing business entities, value objects, and domain rules
//!
//! This module defines the fundamental building blocks of the leaderboard
//! domain: participant records, reward rates, computed leaderboard rows, the
//! error type and the result alias.

pub mod error;
pub mod result;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, ErrorSeverity};
pub use result::AppResult;
pub use types::*;

/// Domain constants and business rules
pub mod domain {
    /// Reward rates
    pub mod rates {
        /// Fraction of a referee's points credited to the direct referrer
        pub const DEFAULT_REFERRAL_POINTS_RATE: f64 = 0.10;

        /// Fraction of a referee's fees credited to the direct referrer
        pub const DEFAULT_REFERRAL_FEES_RATE: f64 = 0.20;

        /// Default points rate of the per-dex views
        pub const DEFAULT_PER_DEX_REFERRAL_POINTS_RATE: f64 = 0.10;

        /// Fraction of a participant's own fees counted toward their total fees.
        /// Not configurable.
        pub const SELF_FEES_SHARE_RATE: f64 = 0.10;
    }

    /// Fallback (referral-count-only) mode
    pub mod fallback {
        /// Points per direct referral when no import is available
        pub const DEFAULT_POINTS_PER_REFERRAL: u64 = 50;
    }
}

/// Numeric rounding rules shared by every leaderboard path
pub mod rounding {
    /// Round to the nearest integer, halves away from zero.
    ///
    /// Inputs are clamped at zero first, so the result always fits `u64`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn round_points(value: f64) -> u64 {
        value.max(0.0).round() as u64
    }

    /// Round to two decimals.
    ///
    /// Values too large to scale are already past two-decimal precision and
    /// are only pulled back into the finite range.
    pub fn round2(value: f64) -> f64 {
        let scaled = value * 100.0;
        if scaled.is_finite() {
            scaled.round() / 100.0
        } else {
            value.clamp(-f64::MAX, f64::MAX)
        }
    }
}
