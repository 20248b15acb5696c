//! Form models with validation at construction
//!
//! All submitted input is parsed into these types before any write.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod fields;
pub mod student;
pub mod instructor;
pub mod course;
pub mod enrollment;

pub use validation::ValidationError;
pub use fields::{NonNegative, RequiredText};
pub use student::{StudentForm, StudentInput};
pub use instructor::{InstructorForm, InstructorInput};
pub use course::{CourseForm, CourseInput};
pub use enrollment::GradeForm;
