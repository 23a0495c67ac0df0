use tracing::info;

use super::StudentService;
use crate::errors::Result;
use crate::models::DeleteOutcome;

pub async fn delete_student(service: &StudentService, id: i64) -> Result<DeleteOutcome> {
    let Some(student) = service.storage.get_student_by_id(id).await? else {
        return Ok(DeleteOutcome::NotFound);
    };

    // 头像删除失败不影响记录删除
    if let Some(path) = student.image_path.as_deref()
        && service.images.exists(path).await
    {
        service.images.discard(path).await;
    }

    if service.storage.delete_student(id).await? {
        info!("Student {} deleted", id);
        Ok(DeleteOutcome::Deleted)
    } else {
        Ok(DeleteOutcome::NotFound)
    }
}
