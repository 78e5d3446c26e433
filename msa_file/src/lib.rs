use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use log::trace;

use crate::{
    error::{Error, Result},
    format::Format,
    io::{skip_any_whitespace, translate_nom_error},
};

pub mod error;
pub mod format;
mod io;
pub mod label;


/// One sequence row of an alignment file: the undecomposed label text and
/// the aligned residue characters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceRecord {
    pub label: String,
    pub sequence: String,
}

impl SequenceRecord {
    /// Decomposes the label into its base name and residue-number range.
    pub fn split(&self) -> (&str, u32, u32) {
        label::split_label(&self.label)
    }
}

/// An eagerly parsed multiple sequence alignment file.
///
/// Records keep their file order and their labels undecomposed; consumers
/// decompose labels on demand with [`label::split_label`].
#[derive(Debug, Clone)]
pub struct MsaFile {
    title: String,
    format: Format,
    records: Vec<SequenceRecord>,
}

impl MsaFile {
    /// Reads an alignment file, detecting the format from the file
    /// extension or, failing that, from the content.
    ///
    /// The title defaults to the file stem.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut input = String::new();
        File::open(path)?.read_to_string(&mut input)?;

        let format = Format::from_extension(path).unwrap_or_else(|| Format::detect(&input));
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        trace!("Reading {format} alignment {title:?} from {path:?}");
        Self::parse(&input, format, title)
    }

    /// Parses an alignment of a known format from any reader.
    pub fn read(mut reader: impl Read, format: Format, title: impl Into<String>) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse(&input, format, title.into())
    }

    fn parse(input: &str, format: Format, title: String) -> Result<Self> {
        let (rest, records) = match format {
            Format::Fasta => format::fasta::parse_fasta(input).map_err(translate_nom_error)?,
            Format::Stockholm => {
                format::stockholm::parse_stockholm(input).map_err(translate_nom_error)?
            }
            Format::Selex => format::stockholm::parse_selex(input).map_err(translate_nom_error)?,
        };

        // FASTA has no terminator, so anything left over is malformed input
        // rather than trailing markup.
        if format == Format::Fasta {
            let rest = skip_any_whitespace(rest).map_err(translate_nom_error)?;
            if !rest.is_empty() {
                return Err(Error::TrailingContent(
                    rest.lines().next().unwrap_or(rest).to_string(),
                ));
            }
        }

        if records.is_empty() {
            return Err(Error::EmptyAlignment(title));
        }
        trace!(
            "Parsed {} sequences of {} residues",
            records.len(),
            records.first().map_or(0, |record| record.sequence.len()),
        );
        Ok(Self {
            title,
            format,
            records,
        })
    }

    /// The display title of the source.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// The `(label, sequence)` records in file order.
    pub fn records(&self) -> &[SequenceRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SequenceRecord> {
        self.records
    }

    /// Number of sequences in the file.
    pub fn sequence_count(&self) -> usize {
        self.records.len()
    }

    /// Number of alignment columns, taken from the first sequence.
    pub fn residue_count(&self) -> usize {
        self.records
            .first()
            .map_or(0, |record| record.sequence.len())
    }

    /// Keeps only the records for which `predicate(label, sequence)` holds.
    pub fn retain(&mut self, mut predicate: impl FnMut(&str, &str) -> bool) {
        self.records
            .retain(|record| predicate(&record.label, &record.sequence));
    }

    /// Keeps only the given alignment columns, in the given order.
    /// Columns beyond a sequence's length are skipped.
    pub fn select_columns(&mut self, columns: &[usize]) {
        for record in &mut self.records {
            let bytes = record.sequence.as_bytes();
            record.sequence = columns
                .iter()
                .filter_map(|&column| bytes.get(column))
                .map(|&byte| byte as char)
                .collect();
        }
    }

    /// Writes the records as FASTA, wrapping sequences at 60 columns.
    pub fn write_fasta(&self, writer: impl Write) -> Result<()> {
        format::fasta::write_fasta(writer, &self.records)
    }
}
