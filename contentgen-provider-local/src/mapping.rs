//! Request shaping from [`GenerationRequest`] into the wire body.

use contentgen_types::GenerationRequest;

use crate::types::ApiRequest;

/// Borrow `req` as the wire body shared by both generation methods.
#[must_use]
pub fn to_api_request(req: &GenerationRequest) -> ApiRequest<'_> {
    ApiRequest {
        contents: &req.contents,
        safety_settings: req.safety_settings.as_deref(),
        generation_config: &req.config,
    }
}
