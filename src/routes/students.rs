use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use super::{not_found, validation_failed};
use crate::errors::Result;
use crate::models::{
    ApiResponse, CreateOutcome, DeleteOutcome, ErrorCode, UpdateOutcome,
    students::{requests::StudentForm, responses::StudentListResponse},
};
use crate::services::{ImageStore, StudentService};
use crate::storage::Storage;
use crate::utils::{MultipartForm, SafeIDI64, guard, read_multipart_form};

fn student_service(
    storage: &web::Data<Arc<dyn Storage>>,
    images: &web::Data<ImageStore>,
) -> StudentService {
    StudentService::new(storage.get_ref().clone(), images.get_ref().clone())
}

// multipart 文本字段映射到表单
fn student_form(form: &MultipartForm) -> Result<StudentForm> {
    Ok(StudentForm {
        id: form.optional_i64("id")?,
        name: form.required_text("name"),
        email: form.optional_text("email"),
        phone: form.optional_text("phone"),
        address: form.optional_text("address"),
        date_of_birth: form.optional_date("date_of_birth")?,
        version: form.optional_i64("version")?,
    })
}

// HTTP处理程序
pub async fn list_students(
    storage: web::Data<Arc<dyn Storage>>,
    images: web::Data<ImageStore>,
) -> ActixResult<HttpResponse> {
    guard("list_students", None, async move {
        let items = student_service(&storage, &images).list().await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentListResponse { items },
            "Students retrieved successfully",
        )))
    })
    .await
}

pub async fn create_student(
    storage: web::Data<Arc<dyn Storage>>,
    images: web::Data<ImageStore>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    guard("create_student", None, async move {
        let mut data = read_multipart_form(payload, images.max_size()).await?;
        let image = data.image.take();
        let form = student_form(&data)?;

        match student_service(&storage, &images).create(form, image).await? {
            CreateOutcome::Created(student) => Ok(HttpResponse::Created()
                .json(ApiResponse::success(student, "Student created successfully"))),
            CreateOutcome::ValidationFailed(failure) => Ok(validation_failed(failure)),
        }
    })
    .await
}

pub async fn get_student(
    storage: web::Data<Arc<dyn Storage>>,
    images: web::Data<ImageStore>,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    guard("get_student", Some(id.0), async move {
        match student_service(&storage, &images).get_for_edit(id.0).await? {
            Some(student) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "Student retrieved successfully",
            ))),
            None => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        }
    })
    .await
}

pub async fn update_student(
    storage: web::Data<Arc<dyn Storage>>,
    images: web::Data<ImageStore>,
    id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    guard("update_student", Some(id.0), async move {
        let mut data = read_multipart_form(payload, images.max_size()).await?;
        let image = data.image.take();
        let form = student_form(&data)?;

        match student_service(&storage, &images)
            .update(id.0, form, image)
            .await?
        {
            UpdateOutcome::Updated(student) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(student, "Student updated successfully"))),
            UpdateOutcome::NotFound => {
                Ok(not_found(ErrorCode::StudentNotFound, "Student not found"))
            }
            UpdateOutcome::ValidationFailed(failure) => Ok(validation_failed(failure)),
        }
    })
    .await
}

pub async fn delete_student(
    storage: web::Data<Arc<dyn Storage>>,
    images: web::Data<ImageStore>,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    guard("delete_student", Some(id.0), async move {
        match student_service(&storage, &images).delete(id.0).await? {
            DeleteOutcome::Deleted => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Student deleted successfully",
            ))),
            DeleteOutcome::NotFound => {
                Ok(not_found(ErrorCode::StudentNotFound, "Student not found"))
            }
        }
    })
    .await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .service(
                web::resource("")
                    .route(web::get().to(list_students))
                    .route(web::post().to(create_student)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_student))
                    .route(web::put().to(update_student))
                    .route(web::delete().to(delete_student)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_form_mapping() {
        let mut data = MultipartForm::default();
        data.insert_text("id", "4");
        data.insert_text("name", "Ada");
        data.insert_text("email", "");
        data.insert_text("date_of_birth", "2011-02-03");
        data.insert_text("version", "2");

        let form = student_form(&data).unwrap();
        assert_eq!(form.id, Some(4));
        assert_eq!(form.name, "Ada");
        assert_eq!(form.email, None);
        assert_eq!(form.date_of_birth, chrono::NaiveDate::from_ymd_opt(2011, 2, 3));
        assert_eq!(form.version, Some(2));
    }

    #[test]
    fn test_student_form_rejects_bad_date() {
        let mut data = MultipartForm::default();
        data.insert_text("name", "Ada");
        data.insert_text("date_of_birth", "03/02/2011");
        assert!(student_form(&data).is_err());
    }
}
