use std::{collections::HashMap, fmt, path::Path};

use log::warn;
use msa_file::{MsaFile, label::split_label};
use ndarray::Array2;

use crate::error::{Error, Result};

use self::{
    index::RowKey,
    iter::{Sequence, Sequences},
};

pub mod index;
pub mod iter;

#[cfg(test)]
mod tests;

/// A multiple sequence alignment held in memory.
///
/// Rows are sequences and columns are aligned residue positions. Every row
/// carries a label, and the base name of each label (the text before a
/// `/start-end` residue-range suffix) is indexed for name-based access.
/// Only the title is mutable; every selection produces a new alignment with
/// its own storage.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Msa {
    matrix: Array2<u8>,
    labels: Vec<String>,
    mapping: HashMap<String, usize>,
    title: String,
}

impl Msa {
    /// Reads an alignment file, delegating format handling to [`MsaFile`].
    ///
    /// Any failure of the underlying reader is reported as
    /// [`Error::UnrecognizedSource`] carrying the cause's description.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file =
            MsaFile::open(path).map_err(|error| Error::UnrecognizedSource(error.to_string()))?;
        Self::from_source(file)
    }

    /// Consumes an already parsed alignment source.
    pub fn from_source(source: MsaFile) -> Result<Self> {
        let title = source.title().to_string();
        Self::from_records(
            title,
            source
                .into_records()
                .into_iter()
                .map(|record| (record.label, record.sequence)),
        )
    }

    /// Stacks `(label, sequence)` pairs into an alignment.
    ///
    /// Every sequence must have the same length. The label index is built
    /// during ingestion; when two labels share a base name, the later row
    /// shadows the earlier one for name-based access.
    pub fn from_records(
        title: impl Into<String>,
        records: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self> {
        let mut labels = Vec::new();
        let mut buffer = Vec::new();
        let mut residue_count = None;

        for (label, sequence) in records {
            let expected = *residue_count.get_or_insert(sequence.len());
            if sequence.len() != expected {
                return Err(Error::SequenceLengthMismatch {
                    label,
                    expected,
                    actual: sequence.len(),
                });
            }
            buffer.extend_from_slice(sequence.as_bytes());
            labels.push(label);
        }

        let residue_count = residue_count.ok_or(Error::EmptyAlignment)?;
        let matrix = Array2::from_shape_vec((labels.len(), residue_count), buffer)
            .expect("the buffer holds residue_count bytes per label");
        let mapping = build_mapping(&labels);

        Ok(Self {
            matrix,
            labels,
            mapping,
            title: title.into(),
        })
    }

    /// Wraps a pre-built character grid.
    ///
    /// `labels` may be empty for an unlabeled grid; otherwise its length
    /// must equal the number of rows.
    pub fn from_array(
        matrix: Array2<u8>,
        labels: Vec<String>,
        title: impl Into<String>,
    ) -> Result<Self> {
        let (labels, mapping) = check_labels(labels, matrix.nrows())?;
        Ok(Self {
            matrix,
            labels,
            mapping,
            title: title.into(),
        })
    }

    /// Wraps a pre-built grid with a caller-supplied label index.
    pub fn from_array_with_mapping(
        matrix: Array2<u8>,
        labels: Vec<String>,
        mapping: HashMap<String, usize>,
        title: impl Into<String>,
    ) -> Result<Self> {
        if labels.len() != matrix.nrows() {
            return Err(Error::LabelCountMismatch {
                labels: labels.len(),
                sequences: matrix.nrows(),
            });
        }
        Ok(Self {
            matrix,
            labels,
            mapping,
            title: title.into(),
        })
    }

    /// Number of sequences (rows).
    pub fn sequence_count(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of residues per sequence (columns).
    pub fn residue_count(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Returns the base name of the row addressed by `key`, with any
    /// residue-range suffix stripped.
    pub fn label(&self, key: impl Into<RowKey>) -> Result<&str> {
        self.full_label(key).map(|label| split_label(label).0)
    }

    /// Returns the raw label text of the row addressed by `key`.
    pub fn full_label(&self, key: impl Into<RowKey>) -> Result<&str> {
        self.resolve_key(key.into())
            .map(|row| self.labels[row].as_str())
    }

    /// Returns the `(start, end)` residue numbers of the row addressed by
    /// `key`, or `(0, 0)` when the label carries no range.
    pub fn residue_range(&self, key: impl Into<RowKey>) -> Result<(u32, u32)> {
        self.full_label(key).map(|label| {
            let (_, start, end) = split_label(label);
            (start, end)
        })
    }

    /// Reports whether `key` is the base name of some row's label.
    /// Never fails; an unlabeled alignment contains nothing.
    pub fn contains(&self, key: &str) -> bool {
        self.mapping.contains_key(key)
    }

    /// Returns an independent copy of the character grid.
    pub fn to_array(&self) -> Array2<u8> {
        self.matrix.clone()
    }

    /// Live grid for trusted collaborators; external callers go through
    /// [`Msa::to_array`].
    pub(crate) fn array(&self) -> &Array2<u8> {
        &self.matrix
    }

    /// Iterates the rows in row order, decoding each label on demand.
    pub fn iter(&self) -> Sequences<'_> {
        Sequences::new(self)
    }

    fn resolve_key(&self, key: RowKey) -> Result<usize> {
        let row = match &key {
            RowKey::Label(name) => match self.mapping.get(name) {
                Some(&row) => row,
                None => return Err(Error::InvalidIndex(key.to_string())),
            },
            RowKey::Position(row) => *row,
        };
        if row < self.sequence_count() {
            Ok(row)
        } else {
            Err(Error::InvalidIndex(key.to_string()))
        }
    }

    pub(crate) fn decode_row(&self, row: usize) -> Sequence {
        let (name, start, end) = split_label(&self.labels[row]);
        Sequence {
            name: name.to_string(),
            residues: self.matrix.row(row).iter().map(|&byte| byte as char).collect(),
            start,
            end,
        }
    }
}

/// Grid-only equality: labels and title are metadata and do not take part.
impl PartialEq for Msa {
    fn eq(&self, other: &Self) -> bool {
        self.array() == other.array()
    }
}

impl Eq for Msa {}

impl fmt::Display for Msa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MSA {} ({} sequences, {} residues)",
            self.title,
            self.sequence_count(),
            self.residue_count()
        )
    }
}

fn check_labels(
    labels: Vec<String>,
    sequences: usize,
) -> Result<(Vec<String>, HashMap<String, usize>)> {
    if labels.is_empty() {
        return Ok((vec![String::new(); sequences], HashMap::new()));
    }
    if labels.len() != sequences {
        return Err(Error::LabelCountMismatch {
            labels: labels.len(),
            sequences,
        });
    }
    let mapping = build_mapping(&labels);
    Ok((labels, mapping))
}

fn build_mapping(labels: &[String]) -> HashMap<String, usize> {
    let mut mapping = HashMap::with_capacity(labels.len());
    for (row, label) in labels.iter().enumerate() {
        let name = split_label(label).0;
        if name.is_empty() {
            continue;
        }
        if let Some(shadowed) = mapping.insert(name.to_string(), row) {
            warn!(
                "Rows {shadowed} and {row} share the base name {name:?}; only row {row} remains reachable by name"
            );
        }
    }
    mapping
}
