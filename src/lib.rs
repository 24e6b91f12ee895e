//! 리버스 프록시 체인에서 HTTP 헤더를 수정하고 CORS 응답을 처리하는 미들웨어입니다.
//!
//! # 주요 기능
//!
//! - 커스텀 요청/응답 헤더 추가 및 삭제
//! - CORS 프리플라이트 감지 및 응답 생성
//! - 리버스 프록시 응답에 대한 CORS 헤더 수정
//!
//! # 예제
//!
//! ```
//! use headers_middleware::middleware::headers::{HeadersConfig, HeadersMiddleware};
//!
//! let mut config = HeadersConfig::default();
//! config.custom_request_headers.insert(
//!     "X-Forwarded-Proto".to_string(),
//!     "https".to_string(),
//! );
//! config.access_control_allow_origin = "*".to_string();
//!
//! // 적용할 설정이 있으면 미들웨어가 생성된다
//! assert!(HeadersMiddleware::new(config).is_some());
//!
//! // 설정이 비어 있으면 체인 구성 단계에서 생략된다
//! assert!(HeadersMiddleware::new(HeadersConfig::default()).is_none());
//! ```
//!
//! # 라벨 기반 설정
//!
//! ```
//! use headers_middleware::middleware::headers::HeadersConfig;
//! use std::collections::HashMap;
//!
//! let mut labels = HashMap::new();
//! labels.insert(
//!     "rproxy.http.middlewares.my-headers.headers.accessControlAllowOrigin".to_string(),
//!     "origin-list-or-null".to_string(),
//! );
//!
//! let config = HeadersConfig::from_labels(&labels, "my-headers").unwrap();
//! assert!(config.has_cors_headers());
//! ```

pub mod logging;
pub mod middleware;
