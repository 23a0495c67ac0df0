//! 统一的错误出口
//!
//! 每个接口都经由 `guard` 执行：失败时按操作名与目标 ID 记录日志，
//! 再交给 `SchoolError` 的 `ResponseError` 实现转换为 HTTP 响应。

use actix_web::{HttpResponse, Result as ActixResult};
use std::future::Future;
use tracing::{error, warn};

use crate::errors::Result;

pub async fn guard<F>(
    operation: &'static str,
    target: Option<i64>,
    fut: F,
) -> ActixResult<HttpResponse>
where
    F: Future<Output = Result<HttpResponse>>,
{
    match fut.await {
        Ok(response) => Ok(response),
        Err(e) => {
            let target = target.map_or_else(|| "-".to_string(), |id| id.to_string());
            if actix_web::ResponseError::status_code(&e).is_server_error() {
                error!("{} failed (id: {}): {}", operation, target, e);
            } else {
                warn!("{} rejected (id: {}): {}", operation, target, e);
            }
            Err(e.into())
        }
    }
}
