//! Tests for response frames and how callers see them

use peernode::{
    handlers::{build_error_response, build_success_response, build_unknown_path_response},
    protocol::{ReqresResponse, ResponseError},
    CallError, Response, PING_PATH, REQRES_PROTOCOL,
};

#[test]
fn test_protocol_identifiers() {
    assert_eq!(REQRES_PROTOCOL, "/peernode/reqres/1.0");
    assert_eq!(PING_PATH, "/ping");
}

#[test]
fn test_success_frame() {
    let frame = build_success_response(b"pong".to_vec());
    let json = serde_json::to_string(&frame).unwrap();
    assert_eq!(json, r#"{"ok":true,"data":"706f6e67"}"#);

    assert_eq!(Response::from(frame), Response::Ok(b"pong".to_vec()));
}

#[test]
fn test_error_frames_map_to_call_errors() {
    let response = Response::from(build_unknown_path_response("/missing".to_string()));
    assert!(matches!(response.error(), Some(CallError::ProtocolUnsupportedByPeer(_))));

    let response = Response::from(build_error_response("boom".to_string()));
    assert_eq!(response.error(), Some(&CallError::Remote("boom".to_string())));
}

#[test]
fn test_error_frame_wire_format() {
    let json = serde_json::to_string(&build_unknown_path_response("/x".to_string())).unwrap();
    assert_eq!(json, r#"{"ok":false,"data":"","error":{"unknown_path":"/x"}}"#);

    let frame: ReqresResponse =
        serde_json::from_str(r#"{"ok":false,"error":{"handler":"bad input"}}"#).unwrap();
    assert_eq!(frame.error, Some(ResponseError::Handler("bad input".to_string())));
    assert!(frame.data.is_empty());
}

#[test]
fn test_failure_without_reason_is_malformed() {
    let frame: ReqresResponse = serde_json::from_str(r#"{"ok":false}"#).unwrap();
    assert!(matches!(Response::from(frame).error(), Some(CallError::MalformedResponse(_))));
}
