//! Request handlers grouped by domain.
//!
//! Handlers only translate between HTTP and `CuraService`/`TextAnalyzer`
//! calls; validation and rules live in the service layer.

pub mod analysis;
pub mod collaborations;
pub mod forums;
pub mod health;
pub mod messages;
pub mod researchers;
