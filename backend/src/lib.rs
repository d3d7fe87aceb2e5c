//! Backend for a tax filing platform.
//!
//! Clients register, verify their phone and business numbers, and ask a tax
//! accountant to act for them through a mandate consent workflow. Each step
//! of that workflow leaves a notification for the other party. Clients pay a
//! 30-day subscription that lapses on read once it expires.
//!
//! The crate is laid out hexagonally: [`domain`] holds entities, ports, and
//! services; [`inbound`] adapts HTTP onto the driving ports; [`outbound`]
//! provides in-memory adapters for the driven ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
