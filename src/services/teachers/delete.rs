use tracing::info;

use super::TeacherService;
use crate::errors::Result;
use crate::models::DeleteOutcome;

pub async fn delete_teacher(service: &TeacherService, id: i64) -> Result<DeleteOutcome> {
    let Some(teacher) = service.storage.get_teacher_by_id(id).await? else {
        return Ok(DeleteOutcome::NotFound);
    };

    // 头像删除失败不影响记录删除
    if let Some(path) = teacher.image_path.as_deref()
        && service.images.exists(path).await
    {
        service.images.discard(path).await;
    }

    if service.storage.delete_teacher(id).await? {
        info!("Teacher {} deleted", id);
        Ok(DeleteOutcome::Deleted)
    } else {
        Ok(DeleteOutcome::NotFound)
    }
}
