use super::{entities::Subject, requests::SubjectForm};
use crate::models::{students::entities::Student, teachers::entities::Teacher};
use serde::Serialize;
use ts_rs::TS;

// 科目列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct SubjectListResponse {
    pub items: Vec<Subject>,
}

// 多选框候选项：全部教师与全部学生
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct SubjectFormOptions {
    pub teachers: Vec<Teacher>,
    pub students: Vec<Student>,
}

// 编辑页数据
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct SubjectEditResponse {
    pub model: SubjectForm,
    pub options: SubjectFormOptions,
}

// 校验失败时回显表单，并带上候选项
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct SubjectValidationFailure {
    pub input: SubjectForm,
    pub errors: Vec<String>,
    pub options: SubjectFormOptions,
}
