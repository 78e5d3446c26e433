use std::{fmt, path::Path};

pub(crate) mod fasta;
pub(crate) mod stockholm;


/// File formats understood by [`MsaFile`](crate::MsaFile).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Format {
    Fasta,
    Selex,
    Stockholm,
}

impl Format {
    /// Detects the format from the beginning of the input.
    ///
    /// A leading `>` marks FASTA and a `# STOCKHOLM` header marks Stockholm;
    /// everything else is treated as SELEX.
    pub fn detect(input: &str) -> Self {
        let input = input.trim_start();
        if input.starts_with('>') {
            Format::Fasta
        } else if input.starts_with("# STOCKHOLM") {
            Format::Stockholm
        } else {
            Format::Selex
        }
    }

    /// Guesses the format from a file extension, if it is a known one.
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "fasta" | "fa" | "fas" | "mfa" => Some(Format::Fasta),
            "sth" | "stk" | "stockholm" => Some(Format::Stockholm),
            "slx" | "selex" => Some(Format::Selex),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Fasta => "FASTA",
            Format::Selex => "SELEX",
            Format::Stockholm => "Stockholm",
        })
    }
}
