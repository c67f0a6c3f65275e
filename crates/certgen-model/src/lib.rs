pub mod error;
pub mod outcome;
pub mod record;
pub mod run;

pub use error::{ServiceError, ServiceResult};
pub use outcome::{
    ArchiveSummary, DeliveryPass, PipelineStage, RowOutcome, RowStatus, RunReport,
};
pub use record::{ParticipantRecord, RequiredField, SourceRow};
pub use run::{DateRange, DeliveryMode, RunConfiguration, UNSET_GROUP, effective_group};
