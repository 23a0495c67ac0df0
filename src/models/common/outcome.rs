//! 管理操作的结果类型
//!
//! NotFound / ValidationFailed 属于正常业务分支，以枚举返回而不是错误；
//! 存储、IO 与并发冲突等异常仍然通过 `Result` 的 `Err` 传播。

use serde::Serialize;
use ts_rs::TS;

#[derive(Debug)]
pub enum CreateOutcome<T, I> {
    Created(T),
    ValidationFailed(I),
}

#[derive(Debug)]
pub enum UpdateOutcome<T, I> {
    Updated(T),
    NotFound,
    ValidationFailed(I),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

// 校验失败：原样返回提交内容与错误列表，供表单回显
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ValidationFailure<T: TS> {
    pub input: T,
    pub errors: Vec<String>,
}

impl<T: TS> ValidationFailure<T> {
    pub fn new(input: T, errors: Vec<String>) -> Self {
        Self { input, errors }
    }
}
