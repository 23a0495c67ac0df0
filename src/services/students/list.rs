use super::StudentService;
use crate::errors::Result;
use crate::models::students::entities::Student;

pub async fn list_students(service: &StudentService) -> Result<Vec<Student>> {
    service.storage.list_students().await
}
