//! 数据模型定义
//!
//! 业务实体、请求与响应结构，与 `entity` 中的数据库实体分离。

pub mod common;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use common::error_code::ErrorCode;
pub use common::outcome::{CreateOutcome, DeleteOutcome, UpdateOutcome, ValidationFailure};
pub use common::response::ApiResponse;
pub use common::upload::ImageUpload;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
