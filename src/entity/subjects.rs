//! 科目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub class: String,
    pub language: String,
    pub version: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::subject_teachers::Entity")]
    SubjectTeachers,
    #[sea_orm(has_many = "super::subject_students::Entity")]
    SubjectStudents,
}

impl Related<super::subject_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectTeachers.def()
    }
}

impl Related<super::subject_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectStudents.def()
    }
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        super::subject_teachers::Relation::Teacher.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::subject_teachers::Relation::Subject.def().rev())
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        super::subject_students::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::subject_students::Relation::Subject.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型（关联由存储层另行加载）
impl Model {
    pub fn into_subject(
        self,
        teachers: Vec<crate::models::teachers::entities::Teacher>,
        students: Vec<crate::models::students::entities::Student>,
    ) -> crate::models::subjects::entities::Subject {
        use crate::models::subjects::entities::Subject;
        use chrono::{DateTime, Utc};

        Subject {
            id: self.id,
            name: self.name,
            class: self.class,
            language: self.language,
            version: self.version,
            teachers,
            students,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
