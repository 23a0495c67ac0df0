use tracing::warn;

use super::{SubjectService, list::list_options};
use crate::errors::Result;
use crate::models::subjects::{
    entities::Subject, requests::SubjectForm, responses::SubjectEditResponse,
};

pub async fn get_subject(service: &SubjectService, id: i64) -> Result<Option<Subject>> {
    service.storage.get_subject_by_id(id).await
}

pub async fn get_subject_for_edit(
    service: &SubjectService,
    id: i64,
) -> Result<Option<SubjectEditResponse>> {
    let Some(subject) = service.storage.get_subject_by_id(id).await? else {
        return Ok(None);
    };

    Ok(Some(SubjectEditResponse {
        model: SubjectForm::from(&subject),
        options: list_options(service).await?,
    }))
}

pub async fn subject_exists(service: &SubjectService, id: i64) -> bool {
    match service.storage.subject_exists(id).await {
        Ok(exists) => exists,
        Err(e) => {
            warn!("Existence check for subject {} failed: {}", id, e);
            false
        }
    }
}
