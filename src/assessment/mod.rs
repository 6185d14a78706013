pub mod clock;
pub mod store;
pub mod types;

pub use clock::{Clock, FixedClock, IdSource, SequentialIds, SystemClock, TimestampIds};
pub use store::AssessmentStore;
pub use types::{AssessmentRecord, ChildDetails, PersonalDetails};
