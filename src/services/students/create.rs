use tracing::info;

use super::{StudentCreateOutcome, StudentService, validate_submission};
use crate::errors::Result;
use crate::models::{
    CreateOutcome, ImageUpload, ValidationFailure,
    students::requests::{SaveStudentRequest, StudentForm},
};

pub async fn create_student(
    service: &StudentService,
    form: StudentForm,
    image: Option<ImageUpload>,
) -> Result<StudentCreateOutcome> {
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

    let request = SaveStudentRequest::from_form(&form, image_path.clone());
    match service.storage.create_student(request).await {
        Ok(student) => {
            info!("Student {} created: {}", student.id, student.name);
            Ok(CreateOutcome::Created(student))
        }
        Err(e) => {
            if let Some(path) = image_path.as_deref() {
                service.images.discard(path).await;
            }
            Err(e)
        }
    }
}
