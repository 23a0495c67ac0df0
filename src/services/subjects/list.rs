use super::SubjectService;
use crate::errors::Result;
use crate::models::subjects::{entities::Subject, responses::SubjectFormOptions};

pub async fn list_subjects(service: &SubjectService) -> Result<Vec<Subject>> {
    service.storage.list_subjects().await
}

// 多选框需要全部教师与全部学生，不做筛选
pub async fn list_options(service: &SubjectService) -> Result<SubjectFormOptions> {
    Ok(SubjectFormOptions {
        teachers: service.storage.list_teachers().await?,
        students: service.storage.list_students().await?,
    })
}
