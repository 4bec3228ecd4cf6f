//! Skipped-route alerting seam
//!
//! Registry initialization never aborts on a bad route; it skips the
//! route and keeps going. Every skip is handed to a [`RouteAlerts`]
//! implementation together with the original payload and the full fault
//! list, so operators can see exactly what was dropped and why.

use crate::error::RouteError;
use crate::raw::RawValue;

/// Receives one notification per skipped route
pub trait RouteAlerts {
    /// Called with the route as written and every reason it was rejected
    ///
    /// `errors` is non-empty and deduplicated. The payload is the raw
    /// description, not a partial parse, so the operator sees what the
    /// configuration actually said.
    fn skipped_route(&self, payload: &RawValue, errors: &[RouteError]);
}

/// Alert handler that emits one structured error event per skip
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlerts;

impl RouteAlerts for TracingAlerts {
    fn skipped_route(&self, payload: &RawValue, errors: &[RouteError]) {
        let reasons: Vec<String> = errors.iter().map(ToString::to_string).collect();
        tracing::error!(route = %payload, reasons = ?reasons, "skipping invalid route");
    }
}
