use tracing::info;

use super::SubjectService;
use crate::errors::Result;
use crate::models::DeleteOutcome;

// 关联行由外键级联删除
pub async fn delete_subject(service: &SubjectService, id: i64) -> Result<DeleteOutcome> {
    if service.storage.delete_subject(id).await? {
        info!("Subject {} deleted", id);
        Ok(DeleteOutcome::Deleted)
    } else {
        Ok(DeleteOutcome::NotFound)
    }
}
