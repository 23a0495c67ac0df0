use serde::Serialize;

// 业务错误码，随 ApiResponse 返回给前端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    ConcurrencyConflict = 1009,

    // 学生 2xxx
    StudentNotFound = 2004,

    // 教师 3xxx
    TeacherNotFound = 3004,

    // 科目 4xxx
    SubjectNotFound = 4004,

    // 图片 5xxx
    ImageNotFound = 5004,
    ImageStoreFailed = 5005,

    InternalServerError = 9999,
}
