use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Subject;

// 科目表单（创建/编辑共用）
//
// teacher_ids / student_ids 为多选框提交的完整集合，每次提交整体替换关联。
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct SubjectForm {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub class: String,
    pub language: String,
    #[serde(default)]
    pub teacher_ids: Vec<i64>,
    #[serde(default)]
    pub student_ids: Vec<i64>,
    #[serde(default)]
    pub version: Option<i64>,
}

impl From<&Subject> for SubjectForm {
    fn from(subject: &Subject) -> Self {
        Self {
            id: Some(subject.id),
            name: subject.name.clone(),
            class: subject.class.clone(),
            language: subject.language.clone(),
            teacher_ids: subject.teacher_ids(),
            student_ids: subject.student_ids(),
            version: Some(subject.version),
        }
    }
}

// 写入存储层的科目字段，关联 ID 已与现存记录求过交集
#[derive(Debug, Clone)]
pub struct SaveSubjectRequest {
    pub name: String,
    pub class: String,
    pub language: String,
    pub teacher_ids: Vec<i64>,
    pub student_ids: Vec<i64>,
}
