//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<Date>,
    pub image_path: Option<String>,
    pub version: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::subject_students::Entity")]
    SubjectStudents,
}

impl Related<super::subject_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectStudents.def()
    }
}

// 多对多：学生 <-> 科目
impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        super::subject_students::Relation::Subject.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::subject_students::Relation::Student.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::students::entities::Student;
        use chrono::{DateTime, Utc};

        Student {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            date_of_birth: self.date_of_birth,
            image_path: self.image_path,
            version: self.version,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
