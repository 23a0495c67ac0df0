use tracing::{error, info};

use super::{
    SubjectService, SubjectUpdateOutcome, requested_members, validate_subject_form,
    validation_failure,
};
use crate::errors::{Result, SchoolError};
use crate::models::{
    UpdateOutcome,
    subjects::requests::{SaveSubjectRequest, SubjectForm},
};

pub async fn update_subject(
    service: &SubjectService,
    id: i64,
    form: SubjectForm,
) -> Result<SubjectUpdateOutcome> {
    if form.id != Some(id) {
        return Ok(UpdateOutcome::NotFound);
    }

    let errors = validate_subject_form(&form);
    if !errors.is_empty() {
        return Ok(UpdateOutcome::ValidationFailed(
            validation_failure(service, form, errors).await?,
        ));
    }

    let Some(existing) = service.storage.get_subject_by_id(id).await? else {
        return Ok(UpdateOutcome::NotFound);
    };
    let expected_version = form.version.unwrap_or(existing.version);

    // 关联整体替换，不做增量比对
    let (teacher_ids, student_ids) = requested_members(&form);
    let request = SaveSubjectRequest {
        name: form.name.trim().to_string(),
        class: form.class.trim().to_string(),
        language: form.language.trim().to_string(),
        teacher_ids,
        student_ids,
    };

    match service
        .storage
        .update_subject(id, expected_version, request)
        .await
    {
        Ok(subject) => {
            info!("Subject {} updated to version {}", id, subject.version);
            Ok(UpdateOutcome::Updated(subject))
        }
        Err(e @ SchoolError::ConcurrencyConflict(_)) => {
            if !service.exists(id).await {
                return Ok(UpdateOutcome::NotFound);
            }
            error!("Concurrency conflict while updating subject {}: {}", id, e);
            Err(e)
        }
        Err(e) => Err(e),
    }
}
