use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Teacher;
use crate::utils::validate::normalize_optional as normalize;

// 教师表单（创建/编辑共用）
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherForm {
    pub id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub qualification: Option<String>,
    pub address: Option<String>,
    pub version: Option<i64>,
}

impl From<&Teacher> for TeacherForm {
    fn from(teacher: &Teacher) -> Self {
        Self {
            id: Some(teacher.id),
            name: teacher.name.clone(),
            email: teacher.email.clone(),
            phone: teacher.phone.clone(),
            qualification: teacher.qualification.clone(),
            address: teacher.address.clone(),
            version: Some(teacher.version),
        }
    }
}

// 写入存储层的教师字段（整体覆盖）
#[derive(Debug, Clone)]
pub struct SaveTeacherRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub qualification: Option<String>,
    pub address: Option<String>,
    pub image_path: Option<String>,
}

impl SaveTeacherRequest {
    pub fn from_form(form: &TeacherForm, image_path: Option<String>) -> Self {
        Self {
            name: form.name.trim().to_string(),
            email: normalize(&form.email),
            phone: normalize(&form.phone),
            qualification: normalize(&form.qualification),
            address: normalize(&form.address),
            image_path,
        }
    }
}
