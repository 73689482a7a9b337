use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum StorageError {
    #[snafu(display("storage id '{raw}' is invalid for {id_type}"))]
    InvalidId {
        stage: &'static str,
        id_type: &'static str,
        raw: String,
    },
    #[snafu(display("contact id '{id}' appears more than once in the directory"))]
    DuplicateContactId { stage: &'static str, id: String },
    #[snafu(display("message id '{message_id}' appears more than once in timeline '{contact_id}'"))]
    DuplicateMessageId {
        stage: &'static str,
        contact_id: String,
        message_id: String,
    },
    #[snafu(display("failed to read seed file at {path}"))]
    ReadSeedFile {
        stage: &'static str,
        path: String,
        source: std::io::Error,
    },
    #[snafu(display("failed to parse seed file at {path}: {source}"))]
    ParseSeedFile {
        stage: &'static str,
        path: String,
        source: serde_json::Error,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;
