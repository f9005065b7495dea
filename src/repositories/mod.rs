pub mod attendance_repository;
pub mod branch_repository;
pub mod exam_repository;
pub mod hall_repository;
pub mod invigilator_repository;
pub mod operator_repository;
pub mod section_repository;
pub mod student_repository;
pub mod year_repository;

pub use attendance_repository::AttendanceRepository;
pub use branch_repository::BranchRepository;
pub use exam_repository::{ExamRepository, NewExam};
pub use hall_repository::HallRepository;
pub use invigilator_repository::InvigilatorRepository;
pub use operator_repository::OperatorRepository;
pub use section_repository::SectionRepository;
pub use student_repository::{StudentFields, StudentFilter, StudentRepository, StudentUpsert};
pub use year_repository::YearRepository;
