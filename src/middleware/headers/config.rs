use crate::middleware::MiddlewareError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 헤더 미들웨어 설정
///
/// 커스텀 요청/응답 헤더와 CORS 관련 설정을 담습니다. 필드 이름은
/// Docker 라벨에서 쓰는 camelCase 표기와 동일합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadersConfig {
    /// 요청에 적용할 커스텀 헤더. 빈 값은 해당 헤더를 삭제합니다.
    pub custom_request_headers: HashMap<String, String>,

    /// 응답에 적용할 커스텀 헤더. 빈 값은 해당 헤더를 삭제합니다.
    pub custom_response_headers: HashMap<String, String>,

    /// Access-Control-Allow-Credentials 헤더를 내보낼지 여부
    pub access_control_allow_credentials: bool,

    /// 프리플라이트 응답에 허용할 헤더 목록
    pub access_control_allow_headers: Vec<String>,

    /// 프리플라이트 응답에 허용할 메서드 목록
    pub access_control_allow_methods: Vec<String>,

    /// "origin-list-or-null" 또는 "*"
    pub access_control_allow_origin: String,

    /// 응답에서 노출할 헤더 목록
    pub access_control_expose_headers: Vec<String>,

    /// 프리플라이트 캐시 시간 (초)
    pub access_control_max_age: i64,
}

impl HeadersConfig {
    /// 커스텀 헤더가 하나라도 설정되어 있는지 확인합니다.
    pub fn has_custom_headers(&self) -> bool {
        !self.custom_request_headers.is_empty() || !self.custom_response_headers.is_empty()
    }

    /// CORS 관련 설정이 하나라도 있는지 확인합니다.
    pub fn has_cors_headers(&self) -> bool {
        self.access_control_allow_credentials
            || !self.access_control_allow_headers.is_empty()
            || !self.access_control_allow_methods.is_empty()
            || !self.access_control_allow_origin.is_empty()
            || !self.access_control_expose_headers.is_empty()
            || self.access_control_max_age > 0
    }

    /// Docker 라벨에서 설정을 파싱합니다.
    ///
    /// # Docker 라벨 예시
    ///
    /// ```yaml
    /// labels:
    ///   - "rproxy.http.middlewares.my-headers.type=headers"
    ///   - "rproxy.http.middlewares.my-headers.headers.customRequestHeaders.X-Forwarded-Proto=https"
    ///   - "rproxy.http.middlewares.my-headers.headers.accessControlAllowOrigin=origin-list-or-null"
    ///   - "rproxy.http.middlewares.my-headers.headers.accessControlMaxAge=600"
    /// ```
    pub fn from_labels(
        labels: &HashMap<String, String>,
        name: &str,
    ) -> Result<Self, MiddlewareError> {
        let prefix = format!("rproxy.http.middlewares.{}.headers.", name);

        let settings: HashMap<String, String> = labels.iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(&prefix)
                    .map(|rest| (rest.to_string(), value.clone()))
            })
            .collect();

        Self::from_flat_map(&settings)
    }

    /// 평탄화된 설정 맵에서 설정을 파싱합니다.
    ///
    /// 키는 `customRequestHeaders.X-Foo`처럼 점으로 구분된 형태이며,
    /// 라벨 그룹핑 단계에서 남은 `headers.` 접두어는 허용됩니다.
    pub fn from_flat_map(settings: &HashMap<String, String>) -> Result<Self, MiddlewareError> {
        let mut config = Self::default();

        for (key, value) in settings {
            let key = key.strip_prefix("headers.").unwrap_or(key);

            match key.split_once('.') {
                Some(("customRequestHeaders", header)) => {
                    config.custom_request_headers.insert(header.to_string(), value.clone());
                }
                Some(("customResponseHeaders", header)) => {
                    config.custom_response_headers.insert(header.to_string(), value.clone());
                }
                None => match key {
                    "accessControlAllowCredentials" => {
                        config.access_control_allow_credentials = value.parse().unwrap_or(false);
                    }
                    "accessControlAllowHeaders" => {
                        config.access_control_allow_headers = split_list(value);
                    }
                    "accessControlAllowMethods" => {
                        config.access_control_allow_methods = split_list(value);
                    }
                    "accessControlAllowOrigin" => {
                        config.access_control_allow_origin = value.clone();
                    }
                    "accessControlExposeHeaders" => {
                        config.access_control_expose_headers = split_list(value);
                    }
                    "accessControlMaxAge" => {
                        config.access_control_max_age = value.parse().map_err(|_| {
                            MiddlewareError::InvalidFormat(format!(
                                "accessControlMaxAge 값이 숫자가 아님: {}",
                                value
                            ))
                        })?;
                    }
                    _ => continue,
                },
                _ => continue,
            }
        }

        Ok(config)
    }

    /// TOML 설정에서 설정을 파싱합니다.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// 쉼표로 구분된 목록을 순서를 유지한 채 분리합니다.
fn split_list(value: &str) -> Vec<String> {
    value.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_nothing() {
        let config = HeadersConfig::default();
        assert!(!config.has_custom_headers());
        assert!(!config.has_cors_headers());
    }

    #[test]
    fn test_custom_headers_predicate() {
        let mut config = HeadersConfig::default();
        config.custom_response_headers.insert("X-Custom".to_string(), "value".to_string());

        assert!(config.has_custom_headers());
        assert!(!config.has_cors_headers());
    }

    #[test]
    fn test_cors_headers_predicate() {
        let mut config = HeadersConfig::default();
        config.access_control_allow_origin = "*".to_string();
        assert!(config.has_cors_headers());

        let mut config = HeadersConfig::default();
        config.access_control_max_age = 600;
        assert!(config.has_cors_headers());

        let mut config = HeadersConfig::default();
        config.access_control_allow_credentials = true;
        assert!(config.has_cors_headers());
    }

    #[test]
    fn test_from_flat_map() {
        let mut settings = HashMap::new();
        settings.insert("customRequestHeaders.X-Forwarded-Proto".to_string(), "https".to_string());
        settings.insert("customResponseHeaders.X-Powered-By".to_string(), "".to_string());
        settings.insert("accessControlAllowOrigin".to_string(), "origin-list-or-null".to_string());
        settings.insert("accessControlAllowMethods".to_string(), "GET, POST".to_string());
        settings.insert("accessControlMaxAge".to_string(), "600".to_string());

        let config = HeadersConfig::from_flat_map(&settings).unwrap();

        assert_eq!(
            config.custom_request_headers.get("X-Forwarded-Proto").map(String::as_str),
            Some("https")
        );
        assert_eq!(
            config.custom_response_headers.get("X-Powered-By").map(String::as_str),
            Some("")
        );
        assert_eq!(config.access_control_allow_origin, "origin-list-or-null");
        assert_eq!(config.access_control_allow_methods, vec!["GET", "POST"]);
        assert_eq!(config.access_control_max_age, 600);
    }

    #[test]
    fn test_from_flat_map_accepts_headers_prefix() {
        let mut settings = HashMap::new();
        settings.insert(
            "headers.customRequestHeaders.X-Request-Id".to_string(),
            "abc".to_string(),
        );

        let config = HeadersConfig::from_flat_map(&settings).unwrap();
        assert_eq!(
            config.custom_request_headers.get("X-Request-Id").map(String::as_str),
            Some("abc")
        );
    }

    #[test]
    fn test_from_flat_map_invalid_max_age() {
        let mut settings = HashMap::new();
        settings.insert("accessControlMaxAge".to_string(), "abc".to_string());

        assert!(HeadersConfig::from_flat_map(&settings).is_err());
    }

    #[test]
    fn test_from_labels() {
        let mut labels = HashMap::new();
        labels.insert(
            "rproxy.http.middlewares.my-headers.headers.customRequestHeaders.X-Forwarded-Proto".to_string(),
            "https".to_string(),
        );
        labels.insert(
            "rproxy.http.middlewares.my-headers.headers.accessControlAllowOrigin".to_string(),
            "*".to_string(),
        );
        // 다른 미들웨어의 라벨은 무시된다
        labels.insert(
            "rproxy.http.middlewares.other.headers.accessControlMaxAge".to_string(),
            "999".to_string(),
        );

        let config = HeadersConfig::from_labels(&labels, "my-headers").unwrap();

        assert_eq!(
            config.custom_request_headers.get("X-Forwarded-Proto").map(String::as_str),
            Some("https")
        );
        assert_eq!(config.access_control_allow_origin, "*");
        assert_eq!(config.access_control_max_age, 0);
    }

    #[test]
    fn test_from_toml() {
        let toml_content = r#"
            accessControlAllowOrigin = "*"
            accessControlAllowMethods = ["GET", "POST"]
            accessControlMaxAge = 600

            [customRequestHeaders]
            "X-Forwarded-Proto" = "https"
        "#;

        let config = HeadersConfig::from_toml(toml_content).unwrap();

        assert_eq!(config.access_control_allow_origin, "*");
        assert_eq!(config.access_control_allow_methods, vec!["GET", "POST"]);
        assert_eq!(config.access_control_max_age, 600);
        assert_eq!(
            config.custom_request_headers.get("X-Forwarded-Proto").map(String::as_str),
            Some("https")
        );
    }

    #[test]
    fn test_from_toml_empty() {
        let config = HeadersConfig::from_toml("").unwrap();
        assert_eq!(config, HeadersConfig::default());
    }

    #[test]
    fn test_split_list_keeps_order() {
        assert_eq!(
            split_list("X-Foo, X-Bar,X-Baz"),
            vec!["X-Foo", "X-Bar", "X-Baz"]
        );
        assert!(split_list("").is_empty());
    }
}
