use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The alignment source was not recognized ({0}).")]
    UnrecognizedSource(String),

    #[error("The number of labels ({labels}) does not match the number of sequences ({sequences}).")]
    LabelCountMismatch { labels: usize, sequences: usize },

    #[error("The sequence {label:?} has {actual} residues, but the alignment has {expected} columns.")]
    SequenceLengthMismatch {
        label: String,
        expected: usize,
        actual: usize,
    },

    #[error("The alignment contains no sequences.")]
    EmptyAlignment,

    #[error("Invalid index: {0}.")]
    InvalidIndex(String),
}
