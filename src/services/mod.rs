pub mod images;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use images::ImageStore;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use teachers::TeacherService;
