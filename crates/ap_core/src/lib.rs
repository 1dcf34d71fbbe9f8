//! ap_core: Roster model, election configuration, and exact ratio helpers.
//!
//! This crate is **I/O-free**. It defines the value types shared across the
//! engine (`ap_algo`, `ap_io`, `ap_pipeline`, `ap_cli`).
//!
//! - Party key: `PartyName`
//! - Roster model: `Candidate`, `Party`, `Roster`, gender-grouped insertion
//! - `ElectionConfig`: electoral quotient Q, seats S, fixed eligibility ratios
//! - Integer-first numerics: `Ratio` compared by cross-multiplication
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod errors {
    use thiserror::Error;

    /// Validation errors for the roster and the configuration.
    #[derive(Clone, Debug, Eq, PartialEq, Error)]
    pub enum CoreError {
        #[error("electoral quotient must be positive, got {0}")]
        InvalidQuotient(i64),
        #[error("seat count must not be negative, got {0}")]
        NegativeSeats(i64),
        #[error("seat count out of range: {0}")]
        SeatsOutOfRange(i64),
        #[error("party name must not be empty")]
        EmptyPartyName,
        #[error("duplicate party name: {0}")]
        DuplicatePartyName(String),
        #[error("invalid ratio (zero denominator)")]
        InvalidRatio,
    }
}

pub mod config;
pub mod ids;
pub mod rounding;
pub mod roster;

pub use config::ElectionConfig;
pub use errors::CoreError;
pub use ids::PartyName;
pub use rounding::Ratio;
pub use roster::{
    insert_candidate, split_by_gender, Candidate, Gender, GenderGroups, NumberedCandidate, Party, Roster,
};
