//! 预导入模块，方便使用

pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subject_students::{
    ActiveModel as SubjectStudentActiveModel, Entity as SubjectStudents,
    Model as SubjectStudentModel,
};
pub use super::subject_teachers::{
    ActiveModel as SubjectTeacherActiveModel, Entity as SubjectTeachers,
    Model as SubjectTeacherModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
