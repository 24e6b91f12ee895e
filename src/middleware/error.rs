use super::Response;

#[derive(Debug, thiserror::Error)]
pub enum MiddlewareError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("잘못된 헤더 형식: {0}")]
    InvalidFormat(String),

    #[error("잘못된 Access-Control-Allow-Origin 설정: {0}")]
    InvalidAllowOrigin(String),

    /// 프리플라이트 요청에 대한 응답. 에러가 아니라 체인을 종료하고
    /// 담긴 응답을 그대로 보내라는 신호입니다.
    #[error("프리플라이트 응답으로 체인 종료")]
    PreflightResponse(Response),
}
