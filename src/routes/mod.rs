pub mod images;

pub mod students;

pub mod subjects;

pub mod teachers;

use actix_web::HttpResponse;
use serde::Serialize;
use ts_rs::TS;

use crate::models::{ApiResponse, ErrorCode};

pub use images::configure_image_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use teachers::configure_teacher_routes;

/// 校验失败：422，回显提交内容与错误列表
pub(crate) fn validation_failed<T: Serialize + TS>(failure: T) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(ApiResponse::error(
        ErrorCode::ValidationFailed,
        failure,
        "Validation failed",
    ))
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}
