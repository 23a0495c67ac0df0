use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{students::entities::Student, teachers::entities::Teacher};

// 科目，读取时总是带上关联的教师与学生
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct Subject {
    // 科目ID
    pub id: i64,
    // 科目名称
    pub name: String,
    // 年级/班级
    pub class: String,
    // 授课语言
    pub language: String,
    // 乐观并发版本号
    pub version: i64,
    // 任课教师
    pub teachers: Vec<Teacher>,
    // 选课学生
    pub students: Vec<Student>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Subject {
    pub fn teacher_ids(&self) -> Vec<i64> {
        self.teachers.iter().map(|t| t.id).collect()
    }

    pub fn student_ids(&self) -> Vec<i64> {
        self.students.iter().map(|s| s.id).collect()
    }
}
