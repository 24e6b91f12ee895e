use super::{MiddlewareError, Request, RequestContext, Response};
use async_trait::async_trait;

/// 미들웨어 트레이트
///
/// HTTP 요청과 응답을 수정할 수 있는 인터페이스를 정의합니다.
/// 요청 시점에 캡처된 정보는 `RequestContext`로 전달되며, 미들웨어 인스턴스는
/// 요청 사이에 공유되는 가변 상태를 가지지 않습니다.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// 미들웨어의 고유 이름을 반환합니다.
    fn name(&self) -> &str;

    /// HTTP 요청을 처리합니다.
    async fn handle_request(
        &self,
        req: Request,
        ctx: &RequestContext,
    ) -> Result<Request, MiddlewareError>;

    /// HTTP 응답을 처리합니다.
    async fn handle_response(
        &self,
        res: Response,
        ctx: &RequestContext,
    ) -> Result<Response, MiddlewareError>;
}
