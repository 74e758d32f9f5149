pub mod apply;
pub mod attachments;
pub mod coordinator;
pub mod processor;
pub mod relation;
pub mod validator;

pub use apply::{lookup_customer_archive, lookup_settlement, validate_apply_form};
pub use attachments::AttachmentStore;
pub use coordinator::{ApplyIdGenerator, BatchCoordinator, TimestampIdGenerator};
pub use processor::{process_row, process_rows, RowMap};
