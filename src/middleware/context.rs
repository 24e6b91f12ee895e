use super::Request;
use hyper::header;

/// 요청 범위 컨텍스트
///
/// 미들웨어가 응답 단계에서 필요로 하는 요청 시점의 정보를 담습니다.
/// Origin 헤더는 헤더 수정이 일어나기 전에 캡처되며, 같은 요청의
/// 응답 처리까지 파라미터로 전달됩니다.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    origin: String,
}

impl RequestContext {
    /// 요청에서 컨텍스트를 캡처합니다.
    pub fn from_request(req: &Request) -> Self {
        let origin = req
            .headers()
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        Self { origin }
    }

    /// 캡처된 Origin 헤더 값을 반환합니다. 헤더가 없었으면 빈 문자열입니다.
    pub fn origin(&self) -> &str {
        &self.origin
    }
}
