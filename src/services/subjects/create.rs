use tracing::info;

use super::{
    SubjectCreateOutcome, SubjectService, requested_members, validate_subject_form,
    validation_failure,
};
use crate::errors::Result;
use crate::models::{
    CreateOutcome,
    subjects::requests::{SaveSubjectRequest, SubjectForm},
};

pub async fn create_subject(
    service: &SubjectService,
    form: SubjectForm,
) -> Result<SubjectCreateOutcome> {
    let errors = validate_subject_form(&form);
    if !errors.is_empty() {
        return Ok(CreateOutcome::ValidationFailed(
            validation_failure(service, form, errors).await?,
        ));
    }

    let (teacher_ids, student_ids) = requested_members(&form);

    let subject = service
        .storage
        .create_subject(SaveSubjectRequest {
            name: form.name.trim().to_string(),
            class: form.class.trim().to_string(),
            language: form.language.trim().to_string(),
            teacher_ids,
            student_ids,
        })
        .await?;

    info!(
        "Subject {} created with {} teachers and {} students",
        subject.id,
        subject.teachers.len(),
        subject.students.len()
    );
    Ok(CreateOutcome::Created(subject))
}
