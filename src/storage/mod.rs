use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::models::{
    students::{entities::Student, requests::SaveStudentRequest},
    subjects::{entities::Subject, requests::SaveSubjectRequest},
    teachers::{entities::Teacher, requests::SaveTeacherRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 实体存储
///
/// `update_*` 以调用方读取到的版本号为条件写入，版本不符或记录已被删除时
/// 返回 `SchoolError::ConcurrencyConflict`，此时记录保持原样（或已不存在）。
/// 其他错误不保证写入未发生。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学生管理方法
    // 列出全部学生（按 ID 升序）
    async fn list_students(&self) -> Result<Vec<Student>>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 创建学生
    async fn create_student(&self, student: SaveStudentRequest) -> Result<Student>;
    // 更新学生（整体覆盖）
    async fn update_student(
        &self,
        id: i64,
        expected_version: i64,
        update: SaveStudentRequest,
    ) -> Result<Student>;
    // 删除学生
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 学生是否存在
    async fn student_exists(&self, id: i64) -> Result<bool>;

    /// 教师管理方法
    // 列出全部教师（按 ID 升序）
    async fn list_teachers(&self) -> Result<Vec<Teacher>>;
    // 通过ID获取教师
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    // 创建教师
    async fn create_teacher(&self, teacher: SaveTeacherRequest) -> Result<Teacher>;
    // 更新教师（整体覆盖）
    async fn update_teacher(
        &self,
        id: i64,
        expected_version: i64,
        update: SaveTeacherRequest,
    ) -> Result<Teacher>;
    // 删除教师
    async fn delete_teacher(&self, id: i64) -> Result<bool>;
    // 教师是否存在
    async fn teacher_exists(&self, id: i64) -> Result<bool>;

    /// 科目管理方法
    // 列出全部科目，附带任课教师与学生
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    // 通过ID获取科目，附带任课教师与学生
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    // 创建科目并写入关联，不存在的成员 ID 被忽略
    async fn create_subject(&self, subject: SaveSubjectRequest) -> Result<Subject>;
    // 更新科目并整体替换关联，不存在的成员 ID 被忽略
    async fn update_subject(
        &self,
        id: i64,
        expected_version: i64,
        update: SaveSubjectRequest,
    ) -> Result<Subject>;
    // 删除科目（关联行由外键级联删除）
    async fn delete_subject(&self, id: i64) -> Result<bool>;
    // 科目是否存在
    async fn subject_exists(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
