use tracing::{error, info, warn};

use super::{TeacherService, TeacherUpdateOutcome, validate_submission};
use crate::errors::{Result, SchoolError};
use crate::models::{
    ImageUpload, UpdateOutcome, ValidationFailure,
    teachers::requests::{SaveTeacherRequest, TeacherForm},
};

pub async fn update_teacher(
    service: &TeacherService,
    id: i64,
    form: TeacherForm,
    image: Option<ImageUpload>,
) -> Result<TeacherUpdateOutcome> {
    if form.id != Some(id) {
        return Ok(UpdateOutcome::NotFound);
    }

    let errors = validate_submission(service, &form, image.as_ref());
    if !errors.is_empty() {
        return Ok(UpdateOutcome::ValidationFailed(ValidationFailure::new(
            form, errors,
        )));
    }

    let Some(existing) = service.storage.get_teacher_by_id(id).await? else {
        return Ok(UpdateOutcome::NotFound);
    };

    let new_image = match &image {
        Some(upload) => Some(service.images.store(upload).await?),
        None => None,
    };
    // 未上传新图片时保留原头像
    let image_path = new_image.clone().or_else(|| existing.image_path.clone());
    let expected_version = form.version.unwrap_or(existing.version);

    let request = SaveTeacherRequest::from_form(&form, image_path);
    match service
        .storage
        .update_teacher(id, expected_version, request)
        .await
    {
        Ok(teacher) => {
            if new_image.is_some()
                && let Some(old) = existing.image_path.as_deref()
            {
                service.images.discard(old).await;
            }
            info!("Teacher {} updated to version {}", id, teacher.version);
            Ok(UpdateOutcome::Updated(teacher))
        }
        Err(e) => {
            if !matches!(e, SchoolError::ConcurrencyConflict(_)) {
                // 写入是否已提交无法确定，记录可能已引用新图片，保留文件
                if let Some(path) = new_image.as_deref() {
                    warn!("Keeping image {} after failed update of teacher {}", path, id);
                }
                return Err(e);
            }
            // 条件更新未命中任何行，新图片无人引用
            if let Some(path) = new_image.as_deref() {
                service.images.discard(path).await;
            }
            // 记录已被删除时按 NotFound 处理，否则冲突向上传播
            if !service.exists(id).await {
                return Ok(UpdateOutcome::NotFound);
            }
            error!("Concurrency conflict while updating teacher {}: {}", id, e);
            Err(e)
        }
    }
}
