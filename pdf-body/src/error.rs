use std::io;

use crate::pdf::Reference;

#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("malformed number tree: {0}")]
    MalformedTree(&'static str),

    #[error("number tree is nested deeper than {0} levels")]
    TreeTooDeep(usize),

    #[error("could not allocate an object number: {0}")]
    Allocation(&'static str),

    #[error("reference {0} does not resolve to an object")]
    UnresolvedReference(Reference),

    #[error("reading the stream payload failed")]
    PayloadRead(#[source] io::Error),

    #[error("encrypting the stream body failed")]
    Encryption(#[source] io::Error),

    #[error("stream filter is neither a name nor an array of names")]
    InvalidFilter,

    #[error("invalid page label: {0}")]
    InvalidPageLabel(&'static str),

    #[error("{0} does not fit into a PDF integer")]
    IntegerOverflow(u64),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("object {reference}: {source}")]
    Object {
        reference: Reference,
        #[source]
        source: Box<BodyError>,
    },
}

impl BodyError {
    /// Attach the object the error occurred in. Errors that already carry an
    /// object keep the innermost one.
    pub(crate) fn in_object(self, reference: &Reference) -> Self {
        match self {
            err @ BodyError::Object { .. } => err,
            err => BodyError::Object {
                reference: reference.clone(),
                source: Box::new(err),
            },
        }
    }
}
