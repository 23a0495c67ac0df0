use tracing::warn;

use super::StudentService;
use crate::errors::Result;
use crate::models::students::entities::Student;

pub async fn get_student(service: &StudentService, id: i64) -> Result<Option<Student>> {
    service.storage.get_student_by_id(id).await
}

// 用于区分并发冲突与记录已删除；查询本身失败时按不存在处理
pub async fn student_exists(service: &StudentService, id: i64) -> bool {
    match service.storage.student_exists(id).await {
        Ok(exists) => exists,
        Err(e) => {
            warn!("Existence check for student {} failed: {}", id, e);
            false
        }
    }
}
