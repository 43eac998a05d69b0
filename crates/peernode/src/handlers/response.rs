//! Response utilities for peernode handlers.
//!
//! This module provides utilities for building response frames.

use crate::protocol::{ReqresResponse, ResponseError};

/// Build a successful response
pub fn build_success_response(data: Vec<u8>,) -> ReqresResponse {
    ReqresResponse { ok: true, data, error: None, }
}

/// Build a response for a handler that failed
pub fn build_error_response(error: String,) -> ReqresResponse {
    ReqresResponse { ok: false, data: Vec::new(), error: Some(ResponseError::Handler(error,),), }
}

/// Build a response for a path with no handler
pub fn build_unknown_path_response(path: String,) -> ReqresResponse {
    ReqresResponse { ok: false, data: Vec::new(), error: Some(ResponseError::UnknownPath(path,),), }
}
