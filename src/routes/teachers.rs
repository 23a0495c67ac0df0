use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use super::{not_found, validation_failed};
use crate::errors::Result;
use crate::models::{
    ApiResponse, CreateOutcome, DeleteOutcome, ErrorCode, UpdateOutcome,
    teachers::{requests::TeacherForm, responses::TeacherListResponse},
};
use crate::services::{ImageStore, TeacherService};
use crate::storage::Storage;
use crate::utils::{MultipartForm, SafeIDI64, guard, read_multipart_form};

fn teacher_service(
    storage: &web::Data<Arc<dyn Storage>>,
    images: &web::Data<ImageStore>,
) -> TeacherService {
    TeacherService::new(storage.get_ref().clone(), images.get_ref().clone())
}

// multipart 文本字段映射到表单
fn teacher_form(form: &MultipartForm) -> Result<TeacherForm> {
    Ok(TeacherForm {
        id: form.optional_i64("id")?,
        name: form.required_text("name"),
        email: form.optional_text("email"),
        phone: form.optional_text("phone"),
        qualification: form.optional_text("qualification"),
        address: form.optional_text("address"),
        version: form.optional_i64("version")?,
    })
}

// HTTP处理程序
pub async fn list_teachers(
    storage: web::Data<Arc<dyn Storage>>,
    images: web::Data<ImageStore>,
) -> ActixResult<HttpResponse> {
    guard("list_teachers", None, async move {
        let items = teacher_service(&storage, &images).list().await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeacherListResponse { items },
            "Teachers retrieved successfully",
        )))
    })
    .await
}

pub async fn create_teacher(
    storage: web::Data<Arc<dyn Storage>>,
    images: web::Data<ImageStore>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    guard("create_teacher", None, async move {
        let mut data = read_multipart_form(payload, images.max_size()).await?;
        let image = data.image.take();
        let form = teacher_form(&data)?;

        match teacher_service(&storage, &images).create(form, image).await? {
            CreateOutcome::Created(teacher) => Ok(HttpResponse::Created()
                .json(ApiResponse::success(teacher, "Teacher created successfully"))),
            CreateOutcome::ValidationFailed(failure) => Ok(validation_failed(failure)),
        }
    })
    .await
}

pub async fn get_teacher(
    storage: web::Data<Arc<dyn Storage>>,
    images: web::Data<ImageStore>,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    guard("get_teacher", Some(id.0), async move {
        match teacher_service(&storage, &images).get_for_edit(id.0).await? {
            Some(teacher) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                teacher,
                "Teacher retrieved successfully",
            ))),
            None => Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        }
    })
    .await
}

pub async fn update_teacher(
    storage: web::Data<Arc<dyn Storage>>,
    images: web::Data<ImageStore>,
    id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    guard("update_teacher", Some(id.0), async move {
        let mut data = read_multipart_form(payload, images.max_size()).await?;
        let image = data.image.take();
        let form = teacher_form(&data)?;

        match teacher_service(&storage, &images)
            .update(id.0, form, image)
            .await?
        {
            UpdateOutcome::Updated(teacher) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(teacher, "Teacher updated successfully"))),
            UpdateOutcome::NotFound => {
                Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found"))
            }
            UpdateOutcome::ValidationFailed(failure) => Ok(validation_failed(failure)),
        }
    })
    .await
}

pub async fn delete_teacher(
    storage: web::Data<Arc<dyn Storage>>,
    images: web::Data<ImageStore>,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    guard("delete_teacher", Some(id.0), async move {
        match teacher_service(&storage, &images).delete(id.0).await? {
            DeleteOutcome::Deleted => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Teacher deleted successfully",
            ))),
            DeleteOutcome::NotFound => {
                Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found"))
            }
        }
    })
    .await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teachers")
            .service(
                web::resource("")
                    .route(web::get().to(list_teachers))
                    .route(web::post().to(create_teacher)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_teacher))
                    .route(web::put().to(update_teacher))
                    .route(web::delete().to(delete_teacher)),
            ),
    );
}
