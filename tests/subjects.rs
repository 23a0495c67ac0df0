mod common;

use common::{TestContext, setup, student_form, subject_form, teacher_form};
use rust_school_records::errors::SchoolError;
use rust_school_records::models::{
    CreateOutcome, DeleteOutcome, UpdateOutcome,
    subjects::{
        entities::Subject,
        requests::{SaveSubjectRequest, SubjectForm},
    },
};
use rust_school_records::services::{StudentService, SubjectService, TeacherService};

fn service(ctx: &TestContext) -> SubjectService {
    SubjectService::new(ctx.storage.clone())
}

async fn seed_teachers(ctx: &TestContext, names: &[&str]) -> Vec<i64> {
    let teachers = TeacherService::new(ctx.storage.clone(), ctx.images.clone());
    let mut ids = Vec::new();
    for name in names {
        match teachers.create(teacher_form(name), None).await.unwrap() {
            CreateOutcome::Created(t) => ids.push(t.id),
            CreateOutcome::ValidationFailed(f) => panic!("{:?}", f.errors),
        }
    }
    ids
}

async fn seed_students(ctx: &TestContext, names: &[&str]) -> Vec<i64> {
    let students = StudentService::new(ctx.storage.clone(), ctx.images.clone());
    let mut ids = Vec::new();
    for name in names {
        match students.create(student_form(name), None).await.unwrap() {
            CreateOutcome::Created(s) => ids.push(s.id),
            CreateOutcome::ValidationFailed(f) => panic!("{:?}", f.errors),
        }
    }
    ids
}

async fn create(service: &SubjectService, form: SubjectForm) -> Subject {
    match service.create(form).await.unwrap() {
        CreateOutcome::Created(subject) => subject,
        CreateOutcome::ValidationFailed(f) => {
            panic!("unexpected validation failure: {:?}", f.errors)
        }
    }
}

#[tokio::test]
async fn test_create_drops_unknown_ids() {
    let ctx = setup().await;
    let service = service(&ctx);
    let teachers = seed_teachers(&ctx, &["Grace", "Alan"]).await;

    let subject = create(
        &service,
        subject_form("Physics", vec![teachers[0], teachers[1], 99], vec![]),
    )
    .await;

    assert_eq!(subject.teacher_ids(), teachers);
    assert!(subject.students.is_empty());
}

#[tokio::test]
async fn test_duplicate_ids_are_collapsed() {
    let ctx = setup().await;
    let service = service(&ctx);
    let students = seed_students(&ctx, &["Ada"]).await;

    let subject = create(
        &service,
        subject_form("Chemistry", vec![], vec![students[0], students[0]]),
    )
    .await;
    assert_eq!(subject.student_ids(), students);
}

#[tokio::test]
async fn test_update_replaces_associations() {
    let ctx = setup().await;
    let service = service(&ctx);
    let students = seed_students(&ctx, &["Ada", "Bob", "Cy"]).await;

    let subject = create(
        &service,
        subject_form("Biology", vec![], vec![students[0], students[1]]),
    )
    .await;

    let mut form = SubjectForm::from(&subject);
    form.student_ids = vec![students[2]];
    let updated = match service.update(subject.id, form).await.unwrap() {
        UpdateOutcome::Updated(subject) => subject,
        other => panic!("unexpected outcome: {other:?}"),
    };

    assert_eq!(updated.student_ids(), vec![students[2]]);
    assert_eq!(updated.version, subject.version + 1);

    let reloaded = service.get_for_delete(subject.id).await.unwrap().unwrap();
    assert_eq!(reloaded.student_ids(), vec![students[2]]);
}

#[tokio::test]
async fn test_update_with_empty_sets_clears_associations() {
    let ctx = setup().await;
    let service = service(&ctx);
    let teachers = seed_teachers(&ctx, &["Grace"]).await;
    let students = seed_students(&ctx, &["Ada"]).await;

    let subject = create(&service, subject_form("Art", teachers, students)).await;

    let mut form = SubjectForm::from(&subject);
    form.teacher_ids.clear();
    form.student_ids.clear();
    match service.update(subject.id, form).await.unwrap() {
        UpdateOutcome::Updated(subject) => {
            assert!(subject.teachers.is_empty());
            assert!(subject.students.is_empty());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_loads_members() {
    let ctx = setup().await;
    let service = service(&ctx);
    let teachers = seed_teachers(&ctx, &["Grace"]).await;
    let students = seed_students(&ctx, &["Ada", "Bob"]).await;

    create(&service, subject_form("Maths", teachers.clone(), students.clone())).await;
    create(&service, subject_form("History", vec![], vec![students[1]])).await;

    let subjects = service.list().await.unwrap();
    assert_eq!(subjects.len(), 2);
    assert_eq!(subjects[0].name, "Maths");
    assert_eq!(subjects[0].teacher_ids(), teachers);
    assert_eq!(subjects[0].student_ids(), students);
    assert!(subjects[1].teachers.is_empty());
    assert_eq!(subjects[1].student_ids(), vec![students[1]]);
}

#[tokio::test]
async fn test_get_for_edit_projects_ids_and_options() {
    let ctx = setup().await;
    let service = service(&ctx);
    let teachers = seed_teachers(&ctx, &["Grace", "Alan"]).await;
    let students = seed_students(&ctx, &["Ada"]).await;

    let subject = create(&service, subject_form("Music", vec![teachers[1]], vec![])).await;

    let edit = service.get_for_edit(subject.id).await.unwrap().unwrap();
    assert_eq!(edit.model.id, Some(subject.id));
    assert_eq!(edit.model.teacher_ids, vec![teachers[1]]);
    assert!(edit.model.student_ids.is_empty());
    assert_eq!(edit.options.teachers.len(), 2);
    assert_eq!(edit.options.students.len(), students.len());

    assert!(service.get_for_edit(subject.id + 100).await.unwrap().is_none());
}

#[tokio::test]
async fn test_validation_failure_carries_options() {
    let ctx = setup().await;
    let service = service(&ctx);
    seed_teachers(&ctx, &["Grace"]).await;

    let mut form = subject_form("", vec![], vec![]);
    form.language = " ".into();

    match service.create(form).await.unwrap() {
        CreateOutcome::ValidationFailed(failure) => {
            assert_eq!(failure.errors.len(), 2);
            assert_eq!(failure.options.teachers.len(), 1);
            assert!(failure.options.students.is_empty());
        }
        CreateOutcome::Created(_) => panic!("invalid subject must not be saved"),
    }
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_mismatched_id_is_not_found() {
    let ctx = setup().await;
    let service = service(&ctx);
    let subject = create(&service, subject_form("Drama", vec![], vec![])).await;

    let mut form = SubjectForm::from(&subject);
    form.name = "Changed".into();
    form.id = Some(subject.id + 1);

    assert!(matches!(
        service.update(subject.id, form).await.unwrap(),
        UpdateOutcome::NotFound
    ));
    let reloaded = service.get_for_delete(subject.id).await.unwrap().unwrap();
    assert_eq!(reloaded.name, "Drama");
}

#[tokio::test]
async fn test_stale_version_is_conflict() {
    let ctx = setup().await;
    let service = service(&ctx);
    let students = seed_students(&ctx, &["Ada", "Bob"]).await;
    let subject = create(&service, subject_form("Latin", vec![], vec![students[0]])).await;

    assert!(matches!(
        service.update(subject.id, SubjectForm::from(&subject)).await.unwrap(),
        UpdateOutcome::Updated(_)
    ));

    let mut stale = SubjectForm::from(&subject);
    stale.student_ids = vec![students[1]];
    let err = service.update(subject.id, stale).await.unwrap_err();
    assert!(matches!(err, SchoolError::ConcurrencyConflict(_)));

    // 冲突时关联保持不变
    let reloaded = service.get_for_delete(subject.id).await.unwrap().unwrap();
    assert_eq!(reloaded.student_ids(), vec![students[0]]);
}

#[tokio::test]
async fn test_delete_cascades_association_rows() {
    let ctx = setup().await;
    let service = service(&ctx);
    let teachers = seed_teachers(&ctx, &["Grace"]).await;
    let students = seed_students(&ctx, &["Ada"]).await;
    let subject = create(&service, subject_form("Geo", teachers.clone(), students.clone())).await;

    assert_eq!(service.delete(subject.id).await.unwrap(), DeleteOutcome::Deleted);
    assert_eq!(service.delete(subject.id).await.unwrap(), DeleteOutcome::NotFound);
    assert!(!service.exists(subject.id).await);

    // 成员本身不受影响
    assert!(ctx.storage.teacher_exists(teachers[0]).await.unwrap());
    assert!(ctx.storage.student_exists(students[0]).await.unwrap());
}

#[tokio::test]
async fn test_deleting_member_detaches_it() {
    let ctx = setup().await;
    let service = service(&ctx);
    let students = seed_students(&ctx, &["Ada", "Bob"]).await;
    let subject = create(&service, subject_form("Art", vec![], students.clone())).await;

    let student_service = StudentService::new(ctx.storage.clone(), ctx.images.clone());
    assert_eq!(
        student_service.delete(students[0]).await.unwrap(),
        DeleteOutcome::Deleted
    );

    let reloaded = service.get_for_delete(subject.id).await.unwrap().unwrap();
    assert_eq!(reloaded.student_ids(), vec![students[1]]);
}

#[tokio::test]
async fn test_store_drops_members_deleted_before_write() {
    let ctx = setup().await;
    let teachers = seed_teachers(&ctx, &["Grace", "Alan"]).await;
    let students = seed_students(&ctx, &["Ada"]).await;

    // 成员在提交表单之后、写入之前被删除
    assert!(ctx.storage.delete_teacher(teachers[1]).await.unwrap());
    assert!(ctx.storage.delete_student(students[0]).await.unwrap());

    let subject = ctx
        .storage
        .create_subject(SaveSubjectRequest {
            name: "Physics".into(),
            class: "10A".into(),
            language: "English".into(),
            teacher_ids: teachers.clone(),
            student_ids: students.clone(),
        })
        .await
        .unwrap();
    assert_eq!(subject.teacher_ids(), vec![teachers[0]]);
    assert!(subject.students.is_empty());

    let updated = ctx
        .storage
        .update_subject(
            subject.id,
            subject.version,
            SaveSubjectRequest {
                name: "Physics".into(),
                class: "10B".into(),
                language: "English".into(),
                teacher_ids: vec![teachers[1], teachers[0], 404],
                student_ids: vec![students[0]],
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.class, "10B");
    assert_eq!(updated.teacher_ids(), vec![teachers[0]]);
    assert!(updated.students.is_empty());
}
