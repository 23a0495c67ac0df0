mod common;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use common::{PNG_BYTES, TestContext, setup};
use rust_school_records::routes;
use rust_school_records::utils::json_error_handler;

const BOUNDARY: &str = "school-records-test-boundary";

/// 拼装 multipart/form-data 请求体
fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, data)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image_file\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(
    req: test::TestRequest,
    fields: &[(&str, &str)],
    image: Option<(&str, &[u8])>,
) -> test::TestRequest {
    req.insert_header((
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    ))
    .set_payload(multipart_body(fields, image))
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.storage.clone()))
                .app_data(web::Data::new($ctx.images.clone()))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .configure(routes::configure_student_routes)
                .configure(routes::configure_teacher_routes)
                .configure(routes::configure_subject_routes)
                .configure(routes::configure_image_routes),
        )
        .await
    };
}

async fn ctx() -> TestContext {
    setup().await
}

#[actix_web::test]
async fn test_student_crud_over_http() {
    let ctx = ctx().await;
    let app = init_app!(ctx);

    // 创建（带头像）
    let req = multipart_request(
        test::TestRequest::post().uri("/api/v1/students"),
        &[("name", "Ada"), ("email", "ada@school.edu"), ("date_of_birth", "2010-05-17")],
        Some(("photo.png", &PNG_BYTES[..])),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    let id = body["data"]["id"].as_i64().unwrap();
    let image_path = body["data"]["image_path"].as_str().unwrap().to_string();
    assert!(image_path.ends_with(".png"));

    // 图片可访问
    let req = test::TestRequest::get()
        .uri(&format!("/images/{image_path}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    let bytes = test::read_body(resp).await;
    assert_eq!(bytes.as_ref(), &PNG_BYTES[..]);

    // 读取
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/students/{id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["name"], "Ada");
    assert_eq!(body["data"]["version"], 1);

    // 更新
    let id_text = id.to_string();
    let req = multipart_request(
        test::TestRequest::put().uri(&format!("/api/v1/students/{id}")),
        &[("id", id_text.as_str()), ("name", "Ada King"), ("version", "1")],
        None,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["name"], "Ada King");
    assert_eq!(body["data"]["image_path"], image_path.as_str());

    // 删除后图片也随之删除
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/students/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/students/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2004);

    let req = test::TestRequest::get()
        .uri(&format!("/images/{image_path}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_student_validation_failure_is_422() {
    let ctx = ctx().await;
    let app = init_app!(ctx);

    let req = multipart_request(
        test::TestRequest::post().uri("/api/v1/students"),
        &[("name", ""), ("email", "broken")],
        None,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1001);
    assert_eq!(body["data"]["input"]["email"], "broken");
    assert_eq!(body["data"]["errors"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_update_with_mismatched_id_is_404() {
    let ctx = ctx().await;
    let app = init_app!(ctx);

    let req = multipart_request(
        test::TestRequest::post().uri("/api/v1/teachers"),
        &[("name", "Grace")],
        None,
    )
    .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let req = multipart_request(
        test::TestRequest::put().uri(&format!("/api/v1/teachers/{id}")),
        &[("id", "999"), ("name", "Changed")],
        None,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3004);
}

#[actix_web::test]
async fn test_invalid_path_parameters_are_400() {
    let ctx = ctx().await;
    let app = init_app!(ctx);

    for uri in ["/api/v1/students/abc", "/api/v1/teachers/0", "/api/v1/subjects/-3"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    }

    let req = test::TestRequest::get().uri("/images/.hidden").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn test_subject_flow_over_http() {
    let ctx = ctx().await;
    let app = init_app!(ctx);

    let mut student_ids = Vec::new();
    for name in ["Ada", "Bob"] {
        let req = multipart_request(
            test::TestRequest::post().uri("/api/v1/students"),
            &[("name", name)],
            None,
        )
        .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        student_ids.push(body["data"]["id"].as_i64().unwrap());
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/subjects/options")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["students"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::post()
        .uri("/api/v1/subjects")
        .set_json(json!({
            "name": "Physics",
            "class": "10A",
            "language": "English",
            "student_ids": [student_ids[0], 999],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["students"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/subjects/{id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["model"]["student_ids"], json!([student_ids[0]]));

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/subjects/{id}"))
        .set_json(json!({
            "id": id,
            "name": "Physics",
            "class": "10B",
            "language": "English",
            "student_ids": [student_ids[1]],
            "version": 1,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["class"], "10B");
    assert_eq!(body["data"]["students"][0]["id"], student_ids[1]);

    // 使用过期版本号再次提交
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/subjects/{id}"))
        .set_json(json!({
            "id": id,
            "name": "Physics",
            "class": "10C",
            "language": "English",
            "version": 1,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1009);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/subjects/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/subjects/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4004);
}

#[actix_web::test]
async fn test_malformed_json_uses_envelope() {
    let ctx = ctx().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/subjects")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);
}

#[actix_web::test]
async fn test_too_many_form_fields_is_400() {
    let ctx = ctx().await;
    let app = init_app!(ctx);

    let names: Vec<String> = (0..40).map(|i| format!("extra_{i}")).collect();
    let mut fields: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "x")).collect();
    fields.push(("name", "Ada"));

    let req = multipart_request(
        test::TestRequest::post().uri("/api/v1/students"),
        &fields,
        None,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/v1/students").to_request(),
    )
    .await;
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_uploaded_file_name_drops_client_directories() {
    let ctx = ctx().await;
    let app = init_app!(ctx);

    let req = multipart_request(
        test::TestRequest::post().uri("/api/v1/teachers"),
        &[("name", "Grace")],
        Some(("../../uploads/portrait.png", &PNG_BYTES[..])),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let image_path = body["data"]["image_path"].as_str().unwrap();
    assert!(image_path.starts_with("portrait_"));
    assert!(ctx.web_root().join(image_path).exists());
}
