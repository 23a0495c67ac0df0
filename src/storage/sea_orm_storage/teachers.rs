//! 教师存储操作

use super::SeaOrmStorage;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{Result, SchoolError};
use crate::models::teachers::{entities::Teacher, requests::SaveTeacherRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 列出全部教师
    pub async fn list_teachers_impl(&self) -> Result<Vec<Teacher>> {
        let teachers = Teachers::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(teachers.into_iter().map(|m| m.into_teacher()).collect())
    }

    /// 通过 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 创建教师
    pub async fn create_teacher_impl(&self, req: SaveTeacherRequest) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            phone: Set(req.phone),
            qualification: Set(req.qualification),
            address: Set(req.address),
            image_path: Set(req.image_path),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建教师失败: {e}")))?;

        Ok(result.into_teacher())
    }

    /// 更新教师，仅当版本号与读取时一致才写入
    pub async fn update_teacher_impl(
        &self,
        id: i64,
        expected_version: i64,
        update: SaveTeacherRequest,
    ) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(update.name),
            email: Set(update.email),
            phone: Set(update.phone),
            qualification: Set(update.qualification),
            address: Set(update.address),
            image_path: Set(update.image_path),
            version: Set(expected_version + 1),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = Teachers::update_many()
            .set(model)
            .filter(Column::Id.eq(id))
            .filter(Column::Version.eq(expected_version))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新教师失败: {e}")))?;

        if result.rows_affected == 0 {
            return Err(SchoolError::concurrency_conflict(format!(
                "教师 {id} 已被修改或删除 (version {expected_version})"
            )));
        }

        self.get_teacher_by_id_impl(id)
            .await?
            .ok_or_else(|| SchoolError::concurrency_conflict(format!("教师 {id} 在更新后被删除")))
    }

    /// 删除教师
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let result = Teachers::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 教师是否存在
    pub async fn teacher_exists_impl(&self, id: i64) -> Result<bool> {
        let count = Teachers::find()
            .filter(Column::Id.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师是否存在失败: {e}")))?;

        Ok(count > 0)
    }
}
