use tracing::warn;

use super::TeacherService;
use crate::errors::Result;
use crate::models::teachers::entities::Teacher;

pub async fn get_teacher(service: &TeacherService, id: i64) -> Result<Option<Teacher>> {
    service.storage.get_teacher_by_id(id).await
}

// 用于区分并发冲突与记录已删除；查询本身失败时按不存在处理
pub async fn teacher_exists(service: &TeacherService, id: i64) -> bool {
    match service.storage.teacher_exists(id).await {
        Ok(exists) => exists,
        Err(e) => {
            warn!("Existence check for teacher {} failed: {}", id, e);
            false
        }
    }
}
