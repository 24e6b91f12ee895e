pub mod chain;
pub mod config;
pub mod context;
pub mod error;
pub mod headers;
pub mod manager;
pub mod response;
pub mod traits;

pub use chain::MiddlewareChain;
pub use config::{MiddlewareConfig, MiddlewareType};
pub use context::RequestContext;
pub use error::MiddlewareError;
pub use manager::MiddlewareManager;
pub use response::handle_middleware_error;
pub use traits::Middleware;

use bytes::Bytes;
use http_body_util::Full;

/// 미들웨어 체인에서 사용하는 요청 타입
pub type Request = hyper::Request<Full<Bytes>>;

/// 미들웨어 체인에서 사용하는 응답 타입
pub type Response = hyper::Response<Full<Bytes>>;
