use tracing::info;

use super::{TeacherCreateOutcome, TeacherService, validate_submission};
use crate::errors::Result;
use crate::models::{
    CreateOutcome, ImageUpload, ValidationFailure,
    teachers::requests::{SaveTeacherRequest, TeacherForm},
};

pub async fn create_teacher(
    service: &TeacherService,
    form: TeacherForm,
    image: Option<ImageUpload>,
) -> Result<TeacherCreateOutcome> {
    let errors = validate_submission(service, &form, image.as_ref());
    if !errors.is_empty() {
        return Ok(CreateOutcome::ValidationFailed(ValidationFailure::new(
            form, errors,
        )));
    }

    // 先落盘图片，再写入记录
    let image_path = match &image {
        Some(upload) => Some(service.images.store(upload).await?),
        None => None,
    };

    let request = SaveTeacherRequest::from_form(&form, image_path.clone());
    match service.storage.create_teacher(request).await {
        Ok(teacher) => {
            info!("Teacher {} created: {}", teacher.id, teacher.name);
            Ok(CreateOutcome::Created(teacher))
        }
        Err(e) => {
            if let Some(path) = image_path.as_deref() {
                service.images.discard(path).await;
            }
            Err(e)
        }
    }
}
