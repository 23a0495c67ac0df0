//! 学生存储操作

use super::SeaOrmStorage;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, SchoolError};
use crate::models::students::{entities::Student, requests::SaveStudentRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 列出全部学生
    pub async fn list_students_impl(&self) -> Result<Vec<Student>> {
        let students = Students::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 创建学生
    pub async fn create_student_impl(&self, req: SaveStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            phone: Set(req.phone),
            address: Set(req.address),
            date_of_birth: Set(req.date_of_birth),
            image_path: Set(req.image_path),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建学生失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 更新学生，仅当版本号与读取时一致才写入
    pub async fn update_student_impl(
        &self,
        id: i64,
        expected_version: i64,
        update: SaveStudentRequest,
    ) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(update.name),
            email: Set(update.email),
            phone: Set(update.phone),
            address: Set(update.address),
            date_of_birth: Set(update.date_of_birth),
            image_path: Set(update.image_path),
            version: Set(expected_version + 1),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = Students::update_many()
            .set(model)
            .filter(Column::Id.eq(id))
            .filter(Column::Version.eq(expected_version))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新学生失败: {e}")))?;

        if result.rows_affected == 0 {
            return Err(SchoolError::concurrency_conflict(format!(
                "学生 {id} 已被修改或删除 (version {expected_version})"
            )));
        }

        self.get_student_by_id_impl(id)
            .await?
            .ok_or_else(|| SchoolError::concurrency_conflict(format!("学生 {id} 在更新后被删除")))
    }

    /// 删除学生
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生是否存在
    pub async fn student_exists_impl(&self, id: i64) -> Result<bool> {
        let count = Students::find()
            .filter(Column::Id.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生是否存在失败: {e}")))?;

        Ok(count > 0)
    }
}
