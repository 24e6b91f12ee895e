use bytes::Bytes;
use http_body_util::Full;
use hyper::StatusCode;
use super::{MiddlewareError, Response};

/// 미들웨어 에러를 HTTP 응답으로 변환합니다.
pub fn handle_middleware_error(err: MiddlewareError) -> Response {
    let err = match err {
        // 프리플라이트는 에러가 아니라 체인을 종료하는 응답이다
        MiddlewareError::PreflightResponse(res) => return res,
        err => err,
    };

    let status = match &err {
        MiddlewareError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    hyper::Response::builder()
        .status(status)
        .body(Full::new(Bytes::from(err.to_string())))
        .unwrap_or_else(|_| {
            Response::new(Full::new(Bytes::from("Internal Server Error")))
        })
}
