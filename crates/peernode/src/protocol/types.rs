//! Protocol type definitions for peernode.
//!
//! [`ReqresRequest`] and [`ReqresResponse`] are the frames on the wire.
//! [`Response`] is what a caller of [`Node::call`](crate::Node::call) gets back.

use serde::{Deserialize, Serialize};

use crate::error::CallError;

/// A request addressed to one handler path on the remote peer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReqresRequest {
    /// Handler path, e.g. `/ping`
    pub path: String,

    /// Opaque payload, hex encoded on the wire
    #[serde(with = "hex")]
    pub data: Vec<u8>,
}

/// Why the remote peer refused or failed a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseError {
    /// No handler is registered for the path
    UnknownPath(String),

    /// The handler returned an error
    Handler(String),
}

/// A response frame from the remote peer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReqresResponse {
    pub ok: bool,

    #[serde(with = "hex", default)]
    pub data: Vec<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

/// Outcome of a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The peer answered; the bytes are whatever its handler returned.
    Ok(Vec<u8>),
    Failed(CallError),
}

impl Response {
    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok(_))
    }

    pub fn data(&self) -> Option<&[u8]> {
        match self {
            Response::Ok(data) => Some(data),
            Response::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&CallError> {
        match self {
            Response::Ok(_) => None,
            Response::Failed(error) => Some(error),
        }
    }

    pub fn into_result(self) -> Result<Vec<u8>, CallError> {
        match self {
            Response::Ok(data) => Ok(data),
            Response::Failed(error) => Err(error),
        }
    }
}

impl From<CallError> for Response {
    fn from(error: CallError) -> Self {
        Response::Failed(error)
    }
}

impl From<ReqresResponse> for Response {
    fn from(frame: ReqresResponse) -> Self {
        if frame.ok {
            return Response::Ok(frame.data);
        }

        let error = match frame.error {
            Some(ResponseError::UnknownPath(path)) => {
                CallError::ProtocolUnsupportedByPeer(format!("no handler for {path}"))
            },
            Some(ResponseError::Handler(message)) => CallError::Remote(message),
            None => CallError::MalformedResponse("failed response without an error".to_string()),
        };
        Response::Failed(error)
    }
}
