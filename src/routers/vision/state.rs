//! State machine types for the vision pipeline.

use axum::response::Response;

/// Processing state for one vision request.
///
/// Cleanup is reached from both the encode and dispatch steps, whatever
/// their outcome, so the upload artifact is deleted on every path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequestState {
    /// Entry state: check that an image was attached.
    Validate,
    /// Read the persisted upload and base64-encode it.
    Encode,
    /// Invoke the vision model.
    Dispatch,
    /// Delete the upload artifact.
    Cleanup,
    /// Build the final HTTP response.
    Respond,
}

/// The result of executing a single step.
pub(crate) enum StepResult {
    /// The step updated `ctx.state`; the driver continues the loop.
    Continue,
    /// Terminal: return this `Response` to the client.
    Response(Response),
}
