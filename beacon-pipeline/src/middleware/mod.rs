//! Built-in middleware stages.
//!
//! The reference order is validation, consent, session, privacy, batch.
//! Applications compose any subset in any order.

pub mod batch;
pub mod consent;
pub mod privacy;
pub mod session;
pub mod validation;

pub use batch::BatchMiddleware;
pub use consent::ConsentMiddleware;
pub use privacy::PrivacyMiddleware;
pub use session::SessionMiddleware;
pub use validation::ValidationMiddleware;
