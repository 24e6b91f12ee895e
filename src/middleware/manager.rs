use tracing::{debug, error};
use crate::middleware::headers::{HeadersConfig, HeadersMiddleware};
use super::config::MiddlewareType;
use super::{
    Middleware, MiddlewareChain, MiddlewareConfig, MiddlewareError, Request, RequestContext,
    Response,
};
use std::collections::HashMap;

/// 미들웨어 설정으로부터 미들웨어 인스턴스를 생성합니다.
///
/// 적용할 내용이 전혀 없는 설정은 `Ok(None)`을 반환하며, 해당 스테이지는
/// 체인에 들어가지 않습니다.
fn create_middleware(
    config: &MiddlewareConfig,
) -> Result<Option<Box<dyn Middleware>>, MiddlewareError> {
    debug!(
        "미들웨어 생성 시작: type={:?}, settings={:?}",
        config.middleware_type, config.settings
    );

    match config.middleware_type {
        MiddlewareType::Headers => {
            let string_settings: HashMap<String, String> = config.settings.iter()
                .map(|(k, v)| {
                    let string_value = v.as_str()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| v.to_string());
                    (k.clone(), string_value)
                })
                .collect();

            let headers_config = HeadersConfig::from_flat_map(&string_settings)?;
            debug!("생성된 헤더 설정: {:?}", headers_config);

            Ok(HeadersMiddleware::new(headers_config)
                .map(|middleware| Box::new(middleware) as Box<dyn Middleware>))
        }
    }
}

fn build_chain<'a, I>(configs: I) -> MiddlewareChain
where
    I: Iterator<Item = (&'a String, &'a MiddlewareConfig)>,
{
    let mut chain = MiddlewareChain::new();

    // 정렬을 위해 Vec으로 변환
    let mut ordered_configs: Vec<_> = configs
        .filter(|(_, config)| config.enabled)
        .collect();
    ordered_configs.sort_by_key(|(_, config)| config.order);

    // 미들웨어 생성 및 체인에 추가
    for (name, config) in ordered_configs {
        match create_middleware(config) {
            Ok(Some(middleware)) => {
                debug!("미들웨어 추가: {} ({})", name, middleware.name());
                chain.add_boxed(middleware);
            }
            Ok(None) => {
                debug!("설정이 비어 있어 미들웨어를 건너뜀: {}", name);
            }
            Err(e) => {
                error!("미들웨어 생성 실패: {}", e);
            }
        }
    }

    chain
}

#[derive(Default)]
pub struct MiddlewareManager {
    chain: MiddlewareChain,
}

impl MiddlewareManager {
    pub fn new(middleware_configs: &HashMap<String, MiddlewareConfig>) -> Self {
        Self {
            chain: build_chain(middleware_configs.iter()),
        }
    }

    /// 요청 체인을 실행합니다.
    ///
    /// 반환된 컨텍스트는 같은 요청의 응답 처리에 그대로 전달해야 합니다.
    pub async fn handle_request(
        &self,
        req: Request,
    ) -> Result<(Request, RequestContext), MiddlewareError> {
        // Origin은 헤더 수정 전에 캡처한다
        let ctx = RequestContext::from_request(&req);
        let req = self.chain.handle_request(req, &ctx).await?;
        Ok((req, ctx))
    }

    pub async fn handle_response(
        &self,
        res: Response,
        ctx: &RequestContext,
    ) -> Result<Response, MiddlewareError> {
        self.chain.handle_response(res, ctx).await
    }

    pub fn update_configs(&mut self, configs: &[(String, MiddlewareConfig)]) {
        self.chain = build_chain(configs.iter().map(|(name, config)| (name, config)));
    }
}
