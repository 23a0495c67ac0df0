//! multipart 表单读取
//!
//! 学生、教师的创建与编辑表单以 multipart/form-data 提交：
//! 普通字段为文本，`image_file` 字段为可选的头像图片。

use actix_multipart::Multipart;
use futures_util::StreamExt;
use std::collections::HashMap;
use std::path::Path;

use crate::errors::{Result, SchoolError};
use crate::models::ImageUpload;

/// 图片字段名
pub const IMAGE_FIELD: &str = "image_file";

// 单个文本字段上限，防止超大普通字段占满内存
const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024;

/// 文本字段个数上限，表单实际只用到其中少数几个
pub const MAX_TEXT_FIELDS: usize = 32;

#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    pub image: Option<ImageUpload>,
}

impl MultipartForm {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// 必填字段，缺失时为空字符串，交给业务校验处理
    pub fn required_text(&self, name: &str) -> String {
        self.text(name).unwrap_or_default().to_string()
    }

    pub fn optional_text(&self, name: &str) -> Option<String> {
        self.text(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn optional_i64(&self, name: &str) -> Result<Option<i64>> {
        match self.optional_text(name) {
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| SchoolError::validation(format!("Field '{name}' must be an integer"))),
            None => Ok(None),
        }
    }

    pub fn optional_date(&self, name: &str) -> Result<Option<chrono::NaiveDate>> {
        match self.optional_text(name) {
            Some(raw) => Ok(Some(chrono::NaiveDate::parse_from_str(&raw, "%Y-%m-%d")?)),
            None => Ok(None),
        }
    }

    pub fn insert_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }
}

/// 读取整个 multipart 表单
///
/// 图片超过 `max_image_size` 时立即中止读取并返回校验错误。
pub async fn read_multipart_form(
    mut payload: Multipart,
    max_image_size: usize,
) -> Result<MultipartForm> {
    let mut form = MultipartForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == IMAGE_FIELD {
            if form.image.is_some() {
                return Err(SchoolError::validation("Only one image can be uploaded"));
            }

            // 只保留文件名部分，丢弃客户端带上的目录
            let file_name = content_disposition
                .and_then(|cd| cd.get_filename())
                .and_then(|f| Path::new(f).file_name())
                .and_then(|f| f.to_str())
                .unwrap_or_default()
                .to_string();

            let mut data = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk?;
                if data.len() + chunk.len() > max_image_size {
                    return Err(SchoolError::validation(format!(
                        "Image exceeds the size limit of {max_image_size} bytes"
                    )));
                }
                data.extend_from_slice(&chunk);
            }

            // 浏览器在未选择文件时也会提交一个空的文件字段
            if file_name.is_empty() && data.is_empty() {
                continue;
            }

            form.image = Some(ImageUpload::new(file_name, data));
        } else if !name.is_empty() {
            if form.fields.len() >= MAX_TEXT_FIELDS && !form.fields.contains_key(&name) {
                return Err(SchoolError::validation(format!(
                    "Form has more than {MAX_TEXT_FIELDS} fields"
                )));
            }

            let mut buf = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk?;
                if buf.len() + chunk.len() > MAX_TEXT_FIELD_SIZE {
                    return Err(SchoolError::validation(format!(
                        "Field '{name}' is too large"
                    )));
                }
                buf.extend_from_slice(&chunk);
            }
            let value = String::from_utf8(buf).map_err(|_| {
                SchoolError::multipart(format!("Field '{name}' is not valid UTF-8"))
            })?;
            form.insert_text(name, value);
        }
    }

    Ok(form)
}
