//! 头像图片访问路由

use actix_web::{HttpResponse, Result as ActixResult, web};
use std::path::Path;

use super::not_found;
use crate::models::ErrorCode;
use crate::services::ImageStore;
use crate::utils::{SafeImageName, guard};

/// 获取图片的 MIME 类型
fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

pub async fn serve_image(
    images: web::Data<ImageStore>,
    file_name: SafeImageName,
) -> ActixResult<HttpResponse> {
    guard("serve_image", None, async move {
        match images.read(&file_name.0).await? {
            // 文件名带随机后缀，内容不会变化，可以长期缓存
            Some(data) => Ok(HttpResponse::Ok()
                .content_type(get_mime_type(&file_name.0))
                .insert_header(("Cache-Control", "public, max-age=31536000, immutable"))
                .body(data)),
            None => Ok(not_found(ErrorCode::ImageNotFound, "Image not found")),
        }
    })
    .await
}

/// 配置图片路由
pub fn configure_image_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/images/{file_name}", web::get().to(serve_image));
}
