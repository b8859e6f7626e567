//! The submission pipeline: validate, persist, store attachments, notify.
//!
//! Steps run strictly in sequence. Anything created before a failure is
//! removed again through the [`UndoLog`](compensation::UndoLog).

pub mod compensation;
pub mod context;
pub mod error;
pub mod ports;
pub mod runner;

pub use compensation::{Undo, UndoLog};
pub use context::{StoredAttachment, SubmissionContext};
pub use error::SubmissionError;
pub use ports::{BlobStore, NewAttachment, NewJobRequest, Notifier, RecordStore, STATUS_NEW};
pub use runner::{SubmissionPipeline, SubmissionReceipt};
