pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::{
    CreateOutcome, DeleteOutcome, ImageUpload, UpdateOutcome, ValidationFailure,
    teachers::{entities::Teacher, requests::TeacherForm},
};
use crate::services::ImageStore;
use crate::storage::Storage;
use crate::utils::validate::{MAX_NAME_LEN, MAX_TEXT_LEN, validate_contact, validate_optional};

pub type TeacherCreateOutcome = CreateOutcome<Teacher, ValidationFailure<TeacherForm>>;
pub type TeacherUpdateOutcome = UpdateOutcome<Teacher, ValidationFailure<TeacherForm>>;

pub struct TeacherService {
    storage: Arc<dyn Storage>,
    images: ImageStore,
}

impl TeacherService {
    pub fn new(storage: Arc<dyn Storage>, images: ImageStore) -> Self {
        Self { storage, images }
    }

    // 获取教师列表
    pub async fn list(&self) -> Result<Vec<Teacher>> {
        list::list_teachers(self).await
    }

    // 编辑页读取
    pub async fn get_for_edit(&self, id: i64) -> Result<Option<Teacher>> {
        get::get_teacher(self, id).await
    }

    // 删除确认页读取
    pub async fn get_for_delete(&self, id: i64) -> Result<Option<Teacher>> {
        get::get_teacher(self, id).await
    }

    // 创建教师，可附带头像
    pub async fn create(
        &self,
        form: TeacherForm,
        image: Option<ImageUpload>,
    ) -> Result<TeacherCreateOutcome> {
        create::create_teacher(self, form, image).await
    }

    // 更新教师，可替换头像
    pub async fn update(
        &self,
        id: i64,
        form: TeacherForm,
        image: Option<ImageUpload>,
    ) -> Result<TeacherUpdateOutcome> {
        update::update_teacher(self, id, form, image).await
    }

    // 删除教师及其头像
    pub async fn delete(&self, id: i64) -> Result<DeleteOutcome> {
        delete::delete_teacher(self, id).await
    }

    // 教师是否存在，查询失败时视为不存在
    pub async fn exists(&self, id: i64) -> bool {
        get::teacher_exists(self, id).await
    }
}

/// 表单校验，返回全部错误信息
pub(crate) fn validate_teacher_form(form: &TeacherForm) -> Vec<String> {
    let mut errors = Vec::new();
    validate_contact(&mut errors, &form.name, &form.email, &form.phone);
    if let Err(msg) = validate_optional("Qualification", &form.qualification, MAX_NAME_LEN) {
        errors.push(msg);
    }
    if let Err(msg) = validate_optional("Address", &form.address, MAX_TEXT_LEN) {
        errors.push(msg);
    }
    errors
}

/// 表单与图片一起校验
pub(crate) fn validate_submission(
    service: &TeacherService,
    form: &TeacherForm,
    image: Option<&ImageUpload>,
) -> Vec<String> {
    let mut errors = validate_teacher_form(form);
    if let Some(upload) = image
        && let Err(msg) = service.images.check(upload)
    {
        errors.push(msg);
    }
    errors
}
