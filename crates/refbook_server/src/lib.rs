//! refbook_server — REST surface for the refbook lookup service.
//!
//! Three read-only endpoints with a uniform failure contract: any error,
//! validation or internal, responds 404 with an `{"error": ...}` body.

pub mod error;
pub mod handlers;
pub mod router;
