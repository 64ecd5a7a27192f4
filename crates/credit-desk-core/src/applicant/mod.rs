pub mod categories;
pub mod form;
pub mod record;

pub use categories::{BureauRating, EducationLevel, MaritalStatus, Occupation, Zone};
pub use record::ApplicantRecord;
