use super::config::HeadersConfig;
use crate::middleware::{Middleware, MiddlewareError, Request, RequestContext, Response};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{self, HeaderMap, HeaderName, HeaderValue};
use hyper::Method;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// 헤더 수정 미들웨어
///
/// 설정된 커스텀 헤더를 요청/응답에 적용하고, CORS 프리플라이트 요청에
/// 직접 응답하며, 프록시 응답에 CORS 헤더를 붙입니다.
#[derive(Debug)]
pub struct HeadersMiddleware {
    config: HeadersConfig,
}

impl HeadersMiddleware {
    /// 설정으로부터 미들웨어를 생성합니다.
    ///
    /// 커스텀 헤더와 CORS 설정이 모두 비어 있으면 적용할 것이 없으므로
    /// `None`을 반환합니다. 체인 구성 단계는 이 경우 스테이지를 생략합니다.
    /// Origin 설정 값의 유효성은 생성 시점이 아니라 요청 처리 시점에 검사됩니다.
    pub fn new(config: HeadersConfig) -> Option<Self> {
        if !config.has_custom_headers() && !config.has_cors_headers() {
            return None;
        }

        Some(Self { config })
    }

    /// 설정된 헤더 맵을 대상 헤더 집합에 적용합니다.
    ///
    /// 빈 값은 해당 헤더를 삭제하고(없으면 아무 일도 하지 않음), 그 외에는
    /// 기존 값을 덮어씁니다. 항목 간 순서 의존성은 없습니다.
    fn apply_headers(
        headers: &mut HeaderMap,
        mapping: &HashMap<String, String>,
    ) -> Result<(), MiddlewareError> {
        for (name, value) in mapping {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                MiddlewareError::InvalidFormat(format!("헤더 이름 {}: {}", name, e))
            })?;

            if value.is_empty() {
                headers.remove(&header_name);
            } else {
                headers.insert(header_name, parse_header_value(value)?);
            }
        }

        Ok(())
    }

    /// Access-Control-Allow-Origin에 넣을 값을 결정합니다.
    ///
    /// `origin-list-or-null` 모드는 캡처된 Origin을 그대로 반사하며,
    /// Origin이 없으면 `null`을 반환합니다.
    fn resolve_allow_origin(&self, ctx: &RequestContext) -> Result<String, MiddlewareError> {
        match self.config.access_control_allow_origin.as_str() {
            "origin-list-or-null" => {
                if ctx.origin().is_empty() {
                    Ok("null".to_string())
                } else {
                    Ok(ctx.origin().to_string())
                }
            }
            "*" => Ok("*".to_string()),
            other => Err(MiddlewareError::InvalidAllowOrigin(other.to_string())),
        }
    }

    /// 프리플라이트 요청에 대한 응답을 생성합니다.
    fn build_preflight_response(&self, ctx: &RequestContext) -> Result<Response, MiddlewareError> {
        let mut response = Response::new(Full::new(Bytes::new()));
        let headers = response.headers_mut();

        if self.config.access_control_allow_credentials {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }

        let allow_headers = self.config.access_control_allow_headers.join(",");
        if !allow_headers.is_empty() {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                parse_header_value(&allow_headers)?,
            );
        }

        let allow_methods = self.config.access_control_allow_methods.join(",");
        if !allow_methods.is_empty() {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                parse_header_value(&allow_methods)?,
            );
        }

        match self.resolve_allow_origin(ctx) {
            Ok(allow_origin) => {
                headers.insert(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    parse_header_value(&allow_origin)?,
                );
            }
            // 프리플라이트에서는 origin 결정 실패가 치명적이지 않다.
            // 헤더만 생략하고 응답은 그대로 내보낸다.
            Err(e) => debug!("프리플라이트 Access-Control-Allow-Origin 결정 실패: {}", e),
        }

        headers.insert(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from(self.config.access_control_max_age),
        );

        Ok(response)
    }
}

#[async_trait]
impl Middleware for HeadersMiddleware {
    fn name(&self) -> &str {
        "headers"
    }

    #[instrument(skip(self, req))]
    async fn handle_request(
        &self,
        mut req: Request,
        ctx: &RequestContext,
    ) -> Result<Request, MiddlewareError> {
        let req_ac_method = header_str(req.headers(), &header::ACCESS_CONTROL_REQUEST_METHOD);
        let req_ac_headers = header_str(req.headers(), &header::ACCESS_CONTROL_REQUEST_HEADERS);

        // 네 조건이 모두 충족될 때만 프리플라이트로 본다
        if !req_ac_method.is_empty()
            && !req_ac_headers.is_empty()
            && !ctx.origin().is_empty()
            && req.method() == Method::OPTIONS
        {
            debug!("CORS 프리플라이트 요청에 직접 응답");
            return Err(MiddlewareError::PreflightResponse(
                self.build_preflight_response(ctx)?,
            ));
        }

        Self::apply_headers(req.headers_mut(), &self.config.custom_request_headers)?;
        Ok(req)
    }

    #[instrument(skip(self, res))]
    async fn handle_response(
        &self,
        mut res: Response,
        ctx: &RequestContext,
    ) -> Result<Response, MiddlewareError> {
        Self::apply_headers(res.headers_mut(), &self.config.custom_response_headers)?;

        if !self.config.has_cors_headers() {
            return Ok(res);
        }

        // 응답 경로에서는 origin 결정 실패를 호출자에게 그대로 전파한다
        let allow_origin = self.resolve_allow_origin(ctx)?;
        res.headers_mut().insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            parse_header_value(&allow_origin)?,
        );

        if self.config.access_control_allow_credentials {
            res.headers_mut().insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }

        let expose_headers = self.config.access_control_expose_headers.join(",");
        if !expose_headers.is_empty() {
            res.headers_mut().insert(
                header::ACCESS_CONTROL_EXPOSE_HEADERS,
                parse_header_value(&expose_headers)?,
            );
        }

        Ok(res)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> &'a str {
    headers.get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

fn parse_header_value(value: &str) -> Result<HeaderValue, MiddlewareError> {
    value.parse::<HeaderValue>()
        .map_err(|e| MiddlewareError::InvalidFormat(format!("헤더 값 {}: {}", value, e)))
}
