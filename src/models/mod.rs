pub mod apply;
pub mod attachment;
pub mod detail;
pub mod query;
pub mod row;

pub use apply::{
    CustomerArchive, InvoiceApplyForm, SettlementItem, DELIVERY_METHODS, EMAIL_DELIVERY,
};
pub use attachment::{
    AttachmentMeta, FileUpload, UploadOutcome, ALLOWED_MIME_TYPES, BATCH_STAGING_KEY,
    MAX_ATTACHMENT_SIZE,
};
pub use detail::{
    mock_invoice_list, ApprovalRecord, DetailAttachment, InvoiceDetail, InvoiceListItem,
};
pub use query::{BatchStatistics, FilterCriteria};
pub use row::{
    InvoiceRequestRow, RowStatus, DELIVERY_FORMATS, DOCUMENT_TYPES, ELECTRONIC_GENERAL,
    ELECTRONIC_SPECIAL, INVOICE_TYPES, PAPER_SPECIAL,
};
