use actix_web::{HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use super::{not_found, validation_failed};
use crate::models::{
    ApiResponse, CreateOutcome, DeleteOutcome, ErrorCode, UpdateOutcome,
    subjects::{requests::SubjectForm, responses::SubjectListResponse},
};
use crate::services::SubjectService;
use crate::storage::Storage;
use crate::utils::{SafeIDI64, guard};

fn subject_service(storage: &web::Data<Arc<dyn Storage>>) -> SubjectService {
    SubjectService::new(storage.get_ref().clone())
}

// HTTP处理程序
pub async fn list_subjects(storage: web::Data<Arc<dyn Storage>>) -> ActixResult<HttpResponse> {
    guard("list_subjects", None, async move {
        let items = subject_service(&storage).list().await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubjectListResponse { items },
            "Subjects retrieved successfully",
        )))
    })
    .await
}

pub async fn get_subject_options(
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<HttpResponse> {
    guard("get_subject_options", None, async move {
        let options = subject_service(&storage).prepare_create_form().await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            options,
            "Subject form options retrieved successfully",
        )))
    })
    .await
}

pub async fn create_subject(
    storage: web::Data<Arc<dyn Storage>>,
    form: web::Json<SubjectForm>,
) -> ActixResult<HttpResponse> {
    guard("create_subject", None, async move {
        match subject_service(&storage).create(form.into_inner()).await? {
            CreateOutcome::Created(subject) => Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully"))),
            CreateOutcome::ValidationFailed(failure) => Ok(validation_failed(failure)),
        }
    })
    .await
}

pub async fn get_subject(
    storage: web::Data<Arc<dyn Storage>>,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    guard("get_subject", Some(id.0), async move {
        match subject_service(&storage).get_for_edit(id.0).await? {
            Some(edit) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                edit,
                "Subject retrieved successfully",
            ))),
            None => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        }
    })
    .await
}

pub async fn update_subject(
    storage: web::Data<Arc<dyn Storage>>,
    id: SafeIDI64,
    form: web::Json<SubjectForm>,
) -> ActixResult<HttpResponse> {
    guard("update_subject", Some(id.0), async move {
        match subject_service(&storage)
            .update(id.0, form.into_inner())
            .await?
        {
            UpdateOutcome::Updated(subject) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(subject, "Subject updated successfully"))),
            UpdateOutcome::NotFound => {
                Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found"))
            }
            UpdateOutcome::ValidationFailed(failure) => Ok(validation_failed(failure)),
        }
    })
    .await
}

pub async fn delete_subject(
    storage: web::Data<Arc<dyn Storage>>,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    guard("delete_subject", Some(id.0), async move {
        match subject_service(&storage).delete(id.0).await? {
            DeleteOutcome::Deleted => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Subject deleted successfully",
            ))),
            DeleteOutcome::NotFound => {
                Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found"))
            }
        }
    })
    .await
}

// 配置路由
pub fn configure_subject_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/subjects")
            .service(
                web::resource("")
                    .route(web::get().to(list_subjects))
                    .route(web::post().to(create_subject)),
            )
            // 必须注册在 /{id} 之前
            .service(web::resource("/options").route(web::get().to(get_subject_options)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_subject))
                    .route(web::put().to(update_subject))
                    .route(web::delete().to(delete_subject)),
            ),
    );
}
