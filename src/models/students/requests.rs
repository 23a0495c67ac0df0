use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Student;
use crate::utils::validate::normalize_optional as normalize;

// 学生表单（创建/编辑共用）
//
// 图片随 multipart 表单单独上传，不在此结构中。
// 编辑时 `id` 必须与路径中的 ID 一致，`version` 为读取时拿到的版本号。
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentForm {
    pub id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub version: Option<i64>,
}

impl From<&Student> for StudentForm {
    fn from(student: &Student) -> Self {
        Self {
            id: Some(student.id),
            name: student.name.clone(),
            email: student.email.clone(),
            phone: student.phone.clone(),
            address: student.address.clone(),
            date_of_birth: student.date_of_birth,
            version: Some(student.version),
        }
    }
}

// 写入存储层的学生字段（整体覆盖）
#[derive(Debug, Clone)]
pub struct SaveStudentRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub image_path: Option<String>,
}

impl SaveStudentRequest {
    pub fn from_form(form: &StudentForm, image_path: Option<String>) -> Self {
        Self {
            name: form.name.trim().to_string(),
            email: normalize(&form.email),
            phone: normalize(&form.phone),
            address: normalize(&form.address),
            date_of_birth: form.date_of_birth,
            image_path,
        }
    }
}
