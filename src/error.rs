use thiserror::Error;

/// Failures of the storage-backed form operations. By the time one of these
/// is returned it has already been logged and shown to the operator.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not load client {id}")]
    Load {
        id: i32,
        #[source]
        source: anyhow::Error,
    },
    #[error("could not save client")]
    Save(#[source] anyhow::Error),
    #[error("could not activate client")]
    Activate(#[source] anyhow::Error),
    #[error("could not deactivate client")]
    Deactivate(#[source] anyhow::Error),
}
