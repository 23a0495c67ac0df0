//! 路径参数安全提取器
//!
//! 非法的路径参数直接以 400 拒绝，不进入业务层。

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use once_cell::sync::Lazy;
use regex::Regex;
use std::future::{Ready, ready};

use crate::errors::SchoolError;

/// 定义一个从路径参数中提取正整数 ID 的提取器
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                std::future::ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => Err(actix_web::Error::from(
                        $crate::errors::SchoolError::validation(format!(
                            "Invalid path parameter '{}'",
                            $param
                        )),
                    )),
                })
            }
        }
    };
}

define_safe_i64_extractor!(SafeIDI64, "id");

static IMAGE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9._-]{0,254}$").expect("Invalid image name regex")
});

/// 图片文件名：只允许单个普通路径片段，防止目录穿越
#[derive(Debug, Clone)]
pub struct SafeImageName(pub String);

impl SafeImageName {
    pub fn is_valid(name: &str) -> bool {
        IMAGE_NAME_RE.is_match(name) && !name.contains("..")
    }
}

impl FromRequest for SafeImageName {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let name = req.match_info().get("file_name").unwrap_or_default();
        ready(if Self::is_valid(name) {
            Ok(SafeImageName(name.to_string()))
        } else {
            Err(SchoolError::validation("Invalid image file name").into())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_name_rules() {
        assert!(SafeImageName::is_valid("photo_0a1b2c.png"));
        assert!(SafeImageName::is_valid("my-photo.jpeg"));
        assert!(!SafeImageName::is_valid("../secret.png"));
        assert!(!SafeImageName::is_valid("a/b.png"));
        assert!(!SafeImageName::is_valid(".hidden"));
        assert!(!SafeImageName::is_valid(""));
    }
}
