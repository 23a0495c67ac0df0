#![allow(dead_code)]

use std::sync::Arc;

use rust_school_records::config::DatabaseConfig;
use rust_school_records::errors::{Result, SchoolError};
use rust_school_records::models::{
    ImageUpload,
    students::{
        entities::Student,
        requests::{SaveStudentRequest, StudentForm},
    },
    subjects::{
        entities::Subject,
        requests::{SaveSubjectRequest, SubjectForm},
    },
    teachers::{
        entities::Teacher,
        requests::{SaveTeacherRequest, TeacherForm},
    },
};
use rust_school_records::services::ImageStore;
use rust_school_records::storage::{Storage, create_storage};
use tempfile::TempDir;

/// 最小的合法 PNG 头
pub const PNG_BYTES: [u8; 16] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
];

pub const MAX_IMAGE_SIZE: usize = 64 * 1024;

/// 每个测试独立的数据库与 Web 根目录，`dir` 被丢弃时一起清理
pub struct TestContext {
    pub storage: Arc<dyn Storage>,
    pub images: ImageStore,
    dir: TempDir,
}

impl TestContext {
    pub fn web_root(&self) -> std::path::PathBuf {
        self.dir.path().join("wwwroot")
    }
}

pub async fn setup() -> TestContext {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = DatabaseConfig {
        url: dir.path().join("school.db").to_string_lossy().into_owned(),
        pool_size: 4,
        timeout: 10,
    };
    let storage = create_storage(&config).await.expect("create storage");

    let images = ImageStore::new(
        dir.path().join("wwwroot"),
        MAX_IMAGE_SIZE,
        vec![".png".into(), ".jpg".into(), ".jpeg".into()],
    );
    images.ensure_root().await.expect("create web root");

    TestContext {
        storage,
        images,
        dir,
    }
}

pub fn png(name: &str) -> ImageUpload {
    ImageUpload::new(name, PNG_BYTES.to_vec())
}

pub fn student_form(name: &str) -> StudentForm {
    StudentForm {
        name: name.to_string(),
        email: Some(format!("{}@school.edu", name.to_lowercase())),
        phone: Some("+1 555 0100".to_string()),
        address: Some("1 Main Street".to_string()),
        date_of_birth: chrono::NaiveDate::from_ymd_opt(2010, 5, 17),
        ..Default::default()
    }
}

pub fn teacher_form(name: &str) -> TeacherForm {
    TeacherForm {
        name: name.to_string(),
        email: Some(format!("{}@school.edu", name.to_lowercase())),
        qualification: Some("MSc".to_string()),
        ..Default::default()
    }
}

pub fn subject_form(name: &str, teacher_ids: Vec<i64>, student_ids: Vec<i64>) -> SubjectForm {
    SubjectForm {
        name: name.to_string(),
        class: "10A".to_string(),
        language: "English".to_string(),
        teacher_ids,
        student_ids,
        ..Default::default()
    }
}

/// 学生、教师的更新照常写入底层存储，随后却向调用方报告失败，
/// 模拟提交成功后回读出错的情况
pub struct FailAfterUpdateStorage {
    inner: Arc<dyn Storage>,
}

impl FailAfterUpdateStorage {
    pub fn wrap(inner: Arc<dyn Storage>) -> Arc<dyn Storage> {
        Arc::new(Self { inner })
    }
}

#[async_trait::async_trait]
impl Storage for FailAfterUpdateStorage {
    async fn list_students(&self) -> Result<Vec<Student>> {
        self.inner.list_students().await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.inner.get_student_by_id(id).await
    }

    async fn create_student(&self, student: SaveStudentRequest) -> Result<Student> {
        self.inner.create_student(student).await
    }

    async fn update_student(
        &self,
        id: i64,
        expected_version: i64,
        update: SaveStudentRequest,
    ) -> Result<Student> {
        self.inner.update_student(id, expected_version, update).await?;
        Err(SchoolError::database_operation("re-read after update failed"))
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.inner.delete_student(id).await
    }

    async fn student_exists(&self, id: i64) -> Result<bool> {
        self.inner.student_exists(id).await
    }

    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        self.inner.list_teachers().await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.inner.get_teacher_by_id(id).await
    }

    async fn create_teacher(&self, teacher: SaveTeacherRequest) -> Result<Teacher> {
        self.inner.create_teacher(teacher).await
    }

    async fn update_teacher(
        &self,
        id: i64,
        expected_version: i64,
        update: SaveTeacherRequest,
    ) -> Result<Teacher> {
        self.inner.update_teacher(id, expected_version, update).await?;
        Err(SchoolError::database_operation("re-read after update failed"))
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.inner.delete_teacher(id).await
    }

    async fn teacher_exists(&self, id: i64) -> Result<bool> {
        self.inner.teacher_exists(id).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.inner.list_subjects().await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.inner.get_subject_by_id(id).await
    }

    async fn create_subject(&self, subject: SaveSubjectRequest) -> Result<Subject> {
        self.inner.create_subject(subject).await
    }

    async fn update_subject(
        &self,
        id: i64,
        expected_version: i64,
        update: SaveSubjectRequest,
    ) -> Result<Subject> {
        self.inner.update_subject(id, expected_version, update).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.inner.delete_subject(id).await
    }

    async fn subject_exists(&self, id: i64) -> Result<bool> {
        self.inner.subject_exists(id).await
    }
}
