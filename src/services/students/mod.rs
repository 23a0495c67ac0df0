pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::{
    CreateOutcome, DeleteOutcome, ImageUpload, UpdateOutcome, ValidationFailure,
    students::{entities::Student, requests::StudentForm},
};
use crate::services::ImageStore;
use crate::storage::Storage;
use crate::utils::validate::{MAX_TEXT_LEN, validate_contact, validate_optional};

pub type StudentCreateOutcome = CreateOutcome<Student, ValidationFailure<StudentForm>>;
pub type StudentUpdateOutcome = UpdateOutcome<Student, ValidationFailure<StudentForm>>;

pub struct StudentService {
    storage: Arc<dyn Storage>,
    images: ImageStore,
}

impl StudentService {
    pub fn new(storage: Arc<dyn Storage>, images: ImageStore) -> Self {
        Self { storage, images }
    }

    // 获取学生列表
    pub async fn list(&self) -> Result<Vec<Student>> {
        list::list_students(self).await
    }

    // 编辑页读取
    pub async fn get_for_edit(&self, id: i64) -> Result<Option<Student>> {
        get::get_student(self, id).await
    }

    // 删除确认页读取
    pub async fn get_for_delete(&self, id: i64) -> Result<Option<Student>> {
        get::get_student(self, id).await
    }

    // 创建学生，可附带头像
    pub async fn create(
        &self,
        form: StudentForm,
        image: Option<ImageUpload>,
    ) -> Result<StudentCreateOutcome> {
        create::create_student(self, form, image).await
    }

    // 更新学生，可替换头像
    pub async fn update(
        &self,
        id: i64,
        form: StudentForm,
        image: Option<ImageUpload>,
    ) -> Result<StudentUpdateOutcome> {
        update::update_student(self, id, form, image).await
    }

    // 删除学生及其头像
    pub async fn delete(&self, id: i64) -> Result<DeleteOutcome> {
        delete::delete_student(self, id).await
    }

    // 学生是否存在，查询失败时视为不存在
    pub async fn exists(&self, id: i64) -> bool {
        get::student_exists(self, id).await
    }
}

/// 表单校验，返回全部错误信息
pub(crate) fn validate_student_form(form: &StudentForm) -> Vec<String> {
    let mut errors = Vec::new();
    validate_contact(&mut errors, &form.name, &form.email, &form.phone);
    if let Err(msg) = validate_optional("Address", &form.address, MAX_TEXT_LEN) {
        errors.push(msg);
    }
    if let Some(dob) = form.date_of_birth
        && dob > chrono::Utc::now().date_naive()
    {
        errors.push("Date of birth cannot be in the future".to_string());
    }
    errors
}

/// 表单与图片一起校验
pub(crate) fn validate_submission(
    service: &StudentService,
    form: &StudentForm,
    image: Option<&ImageUpload>,
) -> Vec<String> {
    let mut errors = validate_student_form(form);
    if let Some(upload) = image
        && let Err(msg) = service.images.check(upload)
    {
        errors.push(msg);
    }
    errors
}
