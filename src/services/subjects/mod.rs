pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::errors::Result;
use crate::models::{
    CreateOutcome, DeleteOutcome, UpdateOutcome,
    subjects::{
        entities::Subject,
        requests::SubjectForm,
        responses::{SubjectEditResponse, SubjectFormOptions, SubjectValidationFailure},
    },
};
use crate::storage::Storage;
use crate::utils::validate::{MAX_NAME_LEN, validate_required};

pub type SubjectCreateOutcome = CreateOutcome<Subject, SubjectValidationFailure>;
pub type SubjectUpdateOutcome = UpdateOutcome<Subject, SubjectValidationFailure>;

pub struct SubjectService {
    storage: Arc<dyn Storage>,
}

impl SubjectService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    // 获取科目列表（含教师与学生）
    pub async fn list(&self) -> Result<Vec<Subject>> {
        list::list_subjects(self).await
    }

    // 新建表单的候选项
    pub async fn prepare_create_form(&self) -> Result<SubjectFormOptions> {
        list::list_options(self).await
    }

    // 创建科目
    pub async fn create(&self, form: SubjectForm) -> Result<SubjectCreateOutcome> {
        create::create_subject(self, form).await
    }

    // 编辑页读取：表单模型与候选项
    pub async fn get_for_edit(&self, id: i64) -> Result<Option<SubjectEditResponse>> {
        get::get_subject_for_edit(self, id).await
    }

    // 删除确认页读取
    pub async fn get_for_delete(&self, id: i64) -> Result<Option<Subject>> {
        get::get_subject(self, id).await
    }

    // 更新科目并整体替换关联
    pub async fn update(&self, id: i64, form: SubjectForm) -> Result<SubjectUpdateOutcome> {
        update::update_subject(self, id, form).await
    }

    // 删除科目
    pub async fn delete(&self, id: i64) -> Result<DeleteOutcome> {
        delete::delete_subject(self, id).await
    }

    // 科目是否存在，查询失败时视为不存在
    pub async fn exists(&self, id: i64) -> bool {
        get::subject_exists(self, id).await
    }
}

pub(crate) fn validate_subject_form(form: &SubjectForm) -> Vec<String> {
    [
        ("Name", form.name.as_str()),
        ("Class", form.class.as_str()),
        ("Language", form.language.as_str()),
    ]
    .into_iter()
    .filter_map(|(field, value)| validate_required(field, value, MAX_NAME_LEN).err())
    .collect()
}

/// 校验失败时连同候选项一起返回
pub(crate) async fn validation_failure(
    service: &SubjectService,
    form: SubjectForm,
    errors: Vec<String>,
) -> Result<SubjectValidationFailure> {
    Ok(SubjectValidationFailure {
        input: form,
        errors,
        options: list::list_options(service).await?,
    })
}

/// 整理提交的成员 ID；不存在的 ID 由存储层在写入事务内剔除
pub(crate) fn requested_members(form: &SubjectForm) -> (Vec<i64>, Vec<i64>) {
    (
        requested_ids(&form.teacher_ids),
        requested_ids(&form.student_ids),
    )
}

// 去重并去掉非法 ID
fn requested_ids(ids: &[i64]) -> Vec<i64> {
    ids.iter()
        .copied()
        .filter(|id| *id > 0)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_ids() {
        assert_eq!(requested_ids(&[3, 1, 3, -2, 0, 2]), vec![1, 2, 3]);
        assert!(requested_ids(&[]).is_empty());
    }

    #[test]
    fn test_validate_subject_form() {
        let form = SubjectForm {
            name: "Physics".into(),
            class: "10A".into(),
            language: "English".into(),
            ..Default::default()
        };
        assert!(validate_subject_form(&form).is_empty());

        let form = SubjectForm {
            name: "Physics".into(),
            ..Default::default()
        };
        assert_eq!(validate_subject_form(&form).len(), 2);
    }
}
