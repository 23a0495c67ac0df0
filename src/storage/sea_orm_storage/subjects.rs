//! 科目存储操作
//!
//! 科目读取时同时加载任课教师与选课学生；写入时在同一事务内
//! 更新科目行并整体替换两张关联表。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::prelude::{
    SubjectStudentActiveModel, SubjectStudents, SubjectTeacherActiveModel, SubjectTeachers,
    Students, Teachers,
};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects, Model as SubjectModel};
use crate::entity::{students, subject_students, subject_teachers, teachers};
use crate::errors::{Result, SchoolError};
use crate::models::{
    students::entities::Student,
    subjects::{entities::Subject, requests::SaveSubjectRequest},
    teachers::entities::Teacher,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

// 按科目 ID 分组的关联成员
type Members = (HashMap<i64, Vec<Teacher>>, HashMap<i64, Vec<Student>>);

impl SeaOrmStorage {
    /// 列出全部科目
    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let subjects = Subjects::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目列表失败: {e}")))?;

        self.attach_members(subjects).await
    }

    /// 通过 ID 获取科目
    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let subject = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目失败: {e}")))?;

        match subject {
            Some(model) => Ok(self.attach_members(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 创建科目
    pub async fn create_subject_impl(&self, req: SaveSubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            name: Set(req.name),
            class: Set(req.class),
            language: Set(req.language),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let subject = model
            .insert(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建科目失败: {e}")))?;

        replace_members(&txn, subject.id, &req.teacher_ids, &req.student_ids).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_subject_by_id_impl(subject.id)
            .await?
            .ok_or_else(|| SchoolError::database_operation("科目创建后无法读取"))
    }

    /// 更新科目，仅当版本号与读取时一致才写入
    pub async fn update_subject_impl(
        &self,
        id: i64,
        expected_version: i64,
        update: SaveSubjectRequest,
    ) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            name: Set(update.name),
            class: Set(update.class),
            language: Set(update.language),
            version: Set(expected_version + 1),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = Subjects::update_many()
            .set(model)
            .filter(Column::Id.eq(id))
            .filter(Column::Version.eq(expected_version))
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新科目失败: {e}")))?;

        if result.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| SchoolError::database_operation(format!("回滚事务失败: {e}")))?;
            return Err(SchoolError::concurrency_conflict(format!(
                "科目 {id} 已被修改或删除 (version {expected_version})"
            )));
        }

        replace_members(&txn, id, &update.teacher_ids, &update.student_ids).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_subject_by_id_impl(id)
            .await?
            .ok_or_else(|| SchoolError::concurrency_conflict(format!("科目 {id} 在更新后被删除")))
    }

    /// 删除科目
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 科目是否存在
    pub async fn subject_exists_impl(&self, id: i64) -> Result<bool> {
        let count = Subjects::find()
            .filter(Column::Id.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目是否存在失败: {e}")))?;

        Ok(count > 0)
    }

    /// 为一组科目加载关联的教师与学生
    async fn attach_members(&self, subjects: Vec<SubjectModel>) -> Result<Vec<Subject>> {
        let ids: Vec<i64> = subjects.iter().map(|s| s.id).collect();
        let (mut teachers, mut students) = load_members(&self.db, &ids).await?;

        Ok(subjects
            .into_iter()
            .map(|subject| {
                let id = subject.id;
                subject.into_subject(
                    teachers.remove(&id).unwrap_or_default(),
                    students.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }
}

/// 通过关联表一次性加载成员，按科目分组
async fn load_members<C: ConnectionTrait>(conn: &C, subject_ids: &[i64]) -> Result<Members> {
    let mut teachers: HashMap<i64, Vec<Teacher>> = HashMap::new();
    let mut students: HashMap<i64, Vec<Student>> = HashMap::new();

    if subject_ids.is_empty() {
        return Ok((teachers, students));
    }

    let teacher_links = SubjectTeachers::find()
        .find_also_related(Teachers)
        .filter(subject_teachers::Column::SubjectId.is_in(subject_ids.iter().copied()))
        .order_by_asc(subject_teachers::Column::TeacherId)
        .all(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("加载科目教师失败: {e}")))?;

    for (link, teacher) in teacher_links {
        if let Some(teacher) = teacher {
            teachers
                .entry(link.subject_id)
                .or_default()
                .push(teacher.into_teacher());
        }
    }

    let student_links = SubjectStudents::find()
        .find_also_related(Students)
        .filter(subject_students::Column::SubjectId.is_in(subject_ids.iter().copied()))
        .order_by_asc(subject_students::Column::StudentId)
        .all(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("加载科目学生失败: {e}")))?;

    for (link, student) in student_links {
        if let Some(student) = student {
            students
                .entry(link.subject_id)
                .or_default()
                .push(student.into_student());
        }
    }

    Ok((teachers, students))
}

/// 在同一连接（事务）内筛出仍存在的教师 ID，锁住这些行直到事务结束
async fn existing_teacher_ids<C: ConnectionTrait>(conn: &C, ids: &[i64]) -> Result<Vec<i64>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    Teachers::find()
        .select_only()
        .column(teachers::Column::Id)
        .filter(teachers::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(teachers::Column::Id)
        .lock_shared()
        .into_tuple::<i64>()
        .all(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("批量查询教师失败: {e}")))
}

/// 在同一连接（事务）内筛出仍存在的学生 ID
async fn existing_student_ids<C: ConnectionTrait>(conn: &C, ids: &[i64]) -> Result<Vec<i64>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    Students::find()
        .select_only()
        .column(students::Column::Id)
        .filter(students::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(students::Column::Id)
        .lock_shared()
        .into_tuple::<i64>()
        .all(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("批量查询学生失败: {e}")))
}

/// 整体替换科目的关联：先清空，再写入本次提交中仍然存在的成员
async fn replace_members<C: ConnectionTrait>(
    conn: &C,
    subject_id: i64,
    teacher_ids: &[i64],
    student_ids: &[i64],
) -> Result<()> {
    let teacher_ids = existing_teacher_ids(conn, teacher_ids).await?;
    let student_ids = existing_student_ids(conn, student_ids).await?;

    SubjectTeachers::delete_many()
        .filter(subject_teachers::Column::SubjectId.eq(subject_id))
        .exec(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("清除科目教师失败: {e}")))?;

    if !teacher_ids.is_empty() {
        let rows = teacher_ids.into_iter().map(|teacher_id| SubjectTeacherActiveModel {
            subject_id: Set(subject_id),
            teacher_id: Set(teacher_id),
            ..Default::default()
        });
        SubjectTeachers::insert_many(rows)
            .exec(conn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("写入科目教师失败: {e}")))?;
    }

    SubjectStudents::delete_many()
        .filter(subject_students::Column::SubjectId.eq(subject_id))
        .exec(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("清除科目学生失败: {e}")))?;

    if !student_ids.is_empty() {
        let rows = student_ids.into_iter().map(|student_id| SubjectStudentActiveModel {
            subject_id: Set(subject_id),
            student_id: Set(student_id),
            ..Default::default()
        });
        SubjectStudents::insert_many(rows)
            .exec(conn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("写入科目学生失败: {e}")))?;
    }

    Ok(())
}
