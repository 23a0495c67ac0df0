use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct Teacher {
    // 教师ID
    pub id: i64,
    // 姓名
    pub name: String,
    // 邮箱
    pub email: Option<String>,
    // 电话
    pub phone: Option<String>,
    // 学历/资格
    pub qualification: Option<String>,
    // 住址
    pub address: Option<String>,
    // 头像相对路径（相对 Web 根目录）
    pub image_path: Option<String>,
    // 乐观并发版本号
    pub version: i64,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
