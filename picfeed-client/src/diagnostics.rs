use crate::api::RequestFailed;

/// Where failed requests end up
///
/// Nothing is surfaced to the viewer: failures are reported here and the view
/// keeps its last known state.
pub trait Diagnostics {
    fn report(&self, context: &str, err: &RequestFailed);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, context: &str, err: &RequestFailed) {
        tracing::error!(method = %err.method, url = %err.url, "{context}: {err}");
    }
}
