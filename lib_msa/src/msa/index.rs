use std::{
    fmt,
    ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive},
};

use ndarray::{Array2, Axis, s};

use super::{Msa, build_mapping, iter::Sequence};
use crate::error::{Error, Result};

#[cfg(test)]
mod tests;

/// A half-open span over one axis. Missing bounds extend to the axis edge,
/// and both bounds clamp to the axis length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl Span {
    fn clamp(self, len: usize) -> Range<usize> {
        let start = self.start.unwrap_or(0).min(len);
        let end = self.end.unwrap_or(len).min(len);
        start..end.max(start)
    }
}

/// Addresses a single row, either positionally or by the base name of its
/// label. A name that is present in the label index always wins over a
/// positional reading; this enum makes the two spellings explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKey {
    Position(usize),
    Label(String),
}

/// Selects rows of an alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSelector {
    /// A single row position.
    Position(usize),
    /// A single row addressed by the base name of its label.
    Label(String),
    /// A contiguous span of rows.
    Range(Span),
    /// An arbitrary list of row positions.
    Positions(Vec<usize>),
    /// An arbitrary list of base names.
    Labels(Vec<String>),
}

/// Selects columns of an alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    /// A single column position.
    Position(usize),
    /// A contiguous span of columns.
    Range(Span),
    /// An arbitrary list of column positions.
    Positions(Vec<usize>),
    /// An explicit per-column keep mask.
    Mask(Vec<bool>),
    /// The columns where the named sequence has a non-gap residue.
    Ungapped(String),
}

/// One access expression against an [`Msa`]: rows only, or rows and
/// columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MsaIndex {
    Row(RowSelector),
    RowColumn(RowSelector, ColumnSelector),
}

/// The shape-classified result of an index expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A single character: one row, one column.
    Residue(char),
    /// A partial row, or one column read downwards; label metadata is not
    /// reconstructable for these and is omitted.
    Residues(String),
    /// One full row, decoded together with its label.
    Sequence(Sequence),
    /// A selection that is still two-dimensional: a derived alignment.
    Alignment(Msa),
}

impl Selection {
    pub fn into_residue(self) -> Option<char> {
        match self {
            Selection::Residue(residue) => Some(residue),
            _ => None,
        }
    }

    pub fn into_residues(self) -> Option<String> {
        match self {
            Selection::Residues(residues) => Some(residues),
            _ => None,
        }
    }

    pub fn into_sequence(self) -> Option<Sequence> {
        match self {
            Selection::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    pub fn into_alignment(self) -> Option<Msa> {
        match self {
            Selection::Alignment(msa) => Some(msa),
            _ => None,
        }
    }
}

/// Rows after symbolic resolution: positional only.
enum Rows {
    One(usize),
    Span(Range<usize>),
    Many(Vec<usize>),
}

/// Columns after symbolic resolution: positional only.
enum Columns {
    One(usize),
    Span(Range<usize>),
    Many(Vec<usize>),
}

impl Msa {
    /// Resolves one access expression and classifies the result by shape.
    ///
    /// Rows accept positions, base names, spans and lists of either.
    /// Columns additionally accept boolean masks, and a base name on the
    /// column side selects the columns where that sequence has no gap.
    /// A single row without a column selector decodes into a
    /// [`Sequence`]; a single row with one decodes into the bare residue
    /// text; anything still two-dimensional becomes a derived [`Msa`] whose
    /// title is the parent's with a trailing prime mark.
    pub fn get(&self, index: impl Into<MsaIndex>) -> Result<Selection> {
        let index = index.into();
        self.select(&index)
            .ok_or_else(|| Error::InvalidIndex(index.to_string()))
    }

    fn select(&self, index: &MsaIndex) -> Option<Selection> {
        match index {
            MsaIndex::Row(rows) => match self.resolve_rows(rows)? {
                Rows::One(row) => Some(Selection::Sequence(self.decode_row(row))),
                rows => {
                    let matrix = self.take_rows(&rows);
                    let labels = self.subset_labels(&rows);
                    Some(Selection::Alignment(self.derive(matrix, labels)))
                }
            },
            MsaIndex::RowColumn(rows, columns) => {
                let rows = self.resolve_rows(rows)?;
                let columns = self.resolve_columns(columns)?;
                Some(match (rows, columns) {
                    (Rows::One(row), Columns::One(column)) => {
                        Selection::Residue(self.matrix[[row, column]] as char)
                    }
                    (Rows::One(row), Columns::Span(range)) => {
                        let row = self.matrix.row(row);
                        Selection::Residues(range.map(|column| row[column] as char).collect())
                    }
                    (Rows::One(row), Columns::Many(positions)) => {
                        let row = self.matrix.row(row);
                        Selection::Residues(
                            positions.iter().map(|&column| row[column] as char).collect(),
                        )
                    }
                    (rows, Columns::One(column)) => {
                        let matrix = self.take_rows(&rows);
                        Selection::Residues(
                            matrix.column(column).iter().map(|&byte| byte as char).collect(),
                        )
                    }
                    (rows, columns) => {
                        let matrix = take_columns(self.take_rows(&rows), &columns);
                        let labels = self.subset_labels(&rows);
                        Selection::Alignment(self.derive(matrix, labels))
                    }
                })
            }
        }
    }

    /// Symbolic-to-positional resolution for rows. Every name must resolve
    /// through the label index; positions must lie inside the grid.
    fn resolve_rows(&self, rows: &RowSelector) -> Option<Rows> {
        let count = self.sequence_count();
        match rows {
            RowSelector::Position(row) => (*row < count).then_some(Rows::One(*row)),
            RowSelector::Label(name) => self.mapping.get(name).map(|&row| Rows::One(row)),
            RowSelector::Range(span) => Some(Rows::Span(span.clamp(count))),
            RowSelector::Positions(positions) => positions
                .iter()
                .all(|&row| row < count)
                .then(|| Rows::Many(positions.clone())),
            RowSelector::Labels(names) => names
                .iter()
                .map(|name| self.mapping.get(name).copied())
                .collect::<Option<Vec<_>>>()
                .map(Rows::Many),
        }
    }

    fn resolve_columns(&self, columns: &ColumnSelector) -> Option<Columns> {
        let count = self.residue_count();
        match columns {
            ColumnSelector::Position(column) => (*column < count).then_some(Columns::One(*column)),
            ColumnSelector::Range(span) => Some(Columns::Span(span.clamp(count))),
            ColumnSelector::Positions(positions) => positions
                .iter()
                .all(|&column| column < count)
                .then(|| Columns::Many(positions.clone())),
            ColumnSelector::Mask(mask) => (mask.len() == count).then(|| {
                Columns::Many(
                    mask.iter()
                        .enumerate()
                        .filter_map(|(column, &keep)| keep.then_some(column))
                        .collect(),
                )
            }),
            ColumnSelector::Ungapped(name) => {
                let &row = self.mapping.get(name)?;
                Some(Columns::Many(
                    self.matrix
                        .row(row)
                        .iter()
                        .enumerate()
                        .filter_map(|(column, &byte)| {
                            byte.is_ascii_alphabetic().then_some(column)
                        })
                        .collect(),
                ))
            }
        }
    }

    fn take_rows(&self, rows: &Rows) -> Array2<u8> {
        match rows {
            Rows::One(row) => self.matrix.slice(s![*row..*row + 1, ..]).to_owned(),
            Rows::Span(range) => self.matrix.slice(s![range.clone(), ..]).to_owned(),
            Rows::Many(positions) => self.matrix.select(Axis(0), positions),
        }
    }

    fn subset_labels(&self, rows: &Rows) -> Vec<String> {
        match rows {
            Rows::One(row) => vec![self.labels[*row].clone()],
            Rows::Span(range) => self.labels[range.clone()].to_vec(),
            Rows::Many(positions) => positions
                .iter()
                .map(|&row| self.labels[row].clone())
                .collect(),
        }
    }

    /// A derived alignment owns its storage and rebuilds the label index
    /// from the selected rows. The trailing prime mark on the title is the
    /// conventional signal for a derived view.
    fn derive(&self, matrix: Array2<u8>, labels: Vec<String>) -> Msa {
        let mapping = build_mapping(&labels);
        Msa {
            matrix,
            labels,
            mapping,
            title: format!("{}'", self.title),
        }
    }
}

fn take_columns(matrix: Array2<u8>, columns: &Columns) -> Array2<u8> {
    match columns {
        Columns::One(column) => matrix.slice(s![.., *column..*column + 1]).to_owned(),
        Columns::Span(range) => matrix.slice(s![.., range.clone()]).to_owned(),
        Columns::Many(positions) => matrix.select(Axis(1), positions),
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span {
            start: Some(range.start),
            end: Some(range.end),
        }
    }
}

impl From<RangeFull> for Span {
    fn from(_: RangeFull) -> Self {
        Span {
            start: None,
            end: None,
        }
    }
}

impl From<RangeFrom<usize>> for Span {
    fn from(range: RangeFrom<usize>) -> Self {
        Span {
            start: Some(range.start),
            end: None,
        }
    }
}

impl From<RangeTo<usize>> for Span {
    fn from(range: RangeTo<usize>) -> Self {
        Span {
            start: None,
            end: Some(range.end),
        }
    }
}

impl From<RangeInclusive<usize>> for Span {
    fn from(range: RangeInclusive<usize>) -> Self {
        Span {
            start: Some(*range.start()),
            end: Some(range.end().saturating_add(1)),
        }
    }
}

impl From<RangeToInclusive<usize>> for Span {
    fn from(range: RangeToInclusive<usize>) -> Self {
        Span {
            start: None,
            end: Some(range.end.saturating_add(1)),
        }
    }
}

impl From<usize> for RowKey {
    fn from(row: usize) -> Self {
        RowKey::Position(row)
    }
}

impl From<&str> for RowKey {
    fn from(name: &str) -> Self {
        RowKey::Label(name.to_string())
    }
}

impl From<String> for RowKey {
    fn from(name: String) -> Self {
        RowKey::Label(name)
    }
}

impl From<usize> for RowSelector {
    fn from(row: usize) -> Self {
        RowSelector::Position(row)
    }
}

impl From<&str> for RowSelector {
    fn from(name: &str) -> Self {
        RowSelector::Label(name.to_string())
    }
}

impl From<String> for RowSelector {
    fn from(name: String) -> Self {
        RowSelector::Label(name)
    }
}

impl From<Range<usize>> for RowSelector {
    fn from(range: Range<usize>) -> Self {
        RowSelector::Range(range.into())
    }
}

impl From<RangeFull> for RowSelector {
    fn from(range: RangeFull) -> Self {
        RowSelector::Range(range.into())
    }
}

impl From<RangeFrom<usize>> for RowSelector {
    fn from(range: RangeFrom<usize>) -> Self {
        RowSelector::Range(range.into())
    }
}

impl From<RangeTo<usize>> for RowSelector {
    fn from(range: RangeTo<usize>) -> Self {
        RowSelector::Range(range.into())
    }
}

impl From<RangeInclusive<usize>> for RowSelector {
    fn from(range: RangeInclusive<usize>) -> Self {
        RowSelector::Range(range.into())
    }
}

impl From<RangeToInclusive<usize>> for RowSelector {
    fn from(range: RangeToInclusive<usize>) -> Self {
        RowSelector::Range(range.into())
    }
}

impl From<Vec<usize>> for RowSelector {
    fn from(positions: Vec<usize>) -> Self {
        RowSelector::Positions(positions)
    }
}

impl From<&[usize]> for RowSelector {
    fn from(positions: &[usize]) -> Self {
        RowSelector::Positions(positions.to_vec())
    }
}

impl From<Vec<String>> for RowSelector {
    fn from(names: Vec<String>) -> Self {
        RowSelector::Labels(names)
    }
}

impl From<Vec<&str>> for RowSelector {
    fn from(names: Vec<&str>) -> Self {
        RowSelector::Labels(names.into_iter().map(str::to_string).collect())
    }
}

impl From<usize> for ColumnSelector {
    fn from(column: usize) -> Self {
        ColumnSelector::Position(column)
    }
}

impl From<&str> for ColumnSelector {
    fn from(name: &str) -> Self {
        ColumnSelector::Ungapped(name.to_string())
    }
}

impl From<String> for ColumnSelector {
    fn from(name: String) -> Self {
        ColumnSelector::Ungapped(name)
    }
}

impl From<Range<usize>> for ColumnSelector {
    fn from(range: Range<usize>) -> Self {
        ColumnSelector::Range(range.into())
    }
}

impl From<RangeFull> for ColumnSelector {
    fn from(range: RangeFull) -> Self {
        ColumnSelector::Range(range.into())
    }
}

impl From<RangeFrom<usize>> for ColumnSelector {
    fn from(range: RangeFrom<usize>) -> Self {
        ColumnSelector::Range(range.into())
    }
}

impl From<RangeTo<usize>> for ColumnSelector {
    fn from(range: RangeTo<usize>) -> Self {
        ColumnSelector::Range(range.into())
    }
}

impl From<RangeInclusive<usize>> for ColumnSelector {
    fn from(range: RangeInclusive<usize>) -> Self {
        ColumnSelector::Range(range.into())
    }
}

impl From<RangeToInclusive<usize>> for ColumnSelector {
    fn from(range: RangeToInclusive<usize>) -> Self {
        ColumnSelector::Range(range.into())
    }
}

impl From<Vec<usize>> for ColumnSelector {
    fn from(positions: Vec<usize>) -> Self {
        ColumnSelector::Positions(positions)
    }
}

impl From<&[usize]> for ColumnSelector {
    fn from(positions: &[usize]) -> Self {
        ColumnSelector::Positions(positions.to_vec())
    }
}

impl From<Vec<bool>> for ColumnSelector {
    fn from(mask: Vec<bool>) -> Self {
        ColumnSelector::Mask(mask)
    }
}

impl From<RowSelector> for MsaIndex {
    fn from(rows: RowSelector) -> Self {
        MsaIndex::Row(rows)
    }
}

impl From<usize> for MsaIndex {
    fn from(row: usize) -> Self {
        MsaIndex::Row(row.into())
    }
}

impl From<&str> for MsaIndex {
    fn from(name: &str) -> Self {
        MsaIndex::Row(name.into())
    }
}

impl From<String> for MsaIndex {
    fn from(name: String) -> Self {
        MsaIndex::Row(name.into())
    }
}

impl From<Range<usize>> for MsaIndex {
    fn from(range: Range<usize>) -> Self {
        MsaIndex::Row(range.into())
    }
}

impl From<RangeFull> for MsaIndex {
    fn from(range: RangeFull) -> Self {
        MsaIndex::Row(range.into())
    }
}

impl From<RangeFrom<usize>> for MsaIndex {
    fn from(range: RangeFrom<usize>) -> Self {
        MsaIndex::Row(range.into())
    }
}

impl From<RangeTo<usize>> for MsaIndex {
    fn from(range: RangeTo<usize>) -> Self {
        MsaIndex::Row(range.into())
    }
}

impl From<RangeInclusive<usize>> for MsaIndex {
    fn from(range: RangeInclusive<usize>) -> Self {
        MsaIndex::Row(range.into())
    }
}

impl From<RangeToInclusive<usize>> for MsaIndex {
    fn from(range: RangeToInclusive<usize>) -> Self {
        MsaIndex::Row(range.into())
    }
}

impl From<Vec<usize>> for MsaIndex {
    fn from(positions: Vec<usize>) -> Self {
        MsaIndex::Row(positions.into())
    }
}

impl From<Vec<String>> for MsaIndex {
    fn from(names: Vec<String>) -> Self {
        MsaIndex::Row(names.into())
    }
}

impl From<Vec<&str>> for MsaIndex {
    fn from(names: Vec<&str>) -> Self {
        MsaIndex::Row(names.into())
    }
}

impl<R: Into<RowSelector>, C: Into<ColumnSelector>> From<(R, C)> for MsaIndex {
    fn from((rows, columns): (R, C)) -> Self {
        MsaIndex::RowColumn(rows.into(), columns.into())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{start}")?;
        }
        write!(f, "..")?;
        if let Some(end) = self.end {
            write!(f, "{end}")?;
        }
        Ok(())
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Position(row) => write!(f, "{row}"),
            RowKey::Label(name) => write!(f, "{name:?}"),
        }
    }
}

impl fmt::Display for RowSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowSelector::Position(row) => write!(f, "{row}"),
            RowSelector::Label(name) => write!(f, "{name:?}"),
            RowSelector::Range(span) => write!(f, "{span}"),
            RowSelector::Positions(positions) => write!(f, "{positions:?}"),
            RowSelector::Labels(names) => write!(f, "{names:?}"),
        }
    }
}

impl fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSelector::Position(column) => write!(f, "{column}"),
            ColumnSelector::Range(span) => write!(f, "{span}"),
            ColumnSelector::Positions(positions) => write!(f, "{positions:?}"),
            ColumnSelector::Mask(mask) => write!(f, "{mask:?}"),
            ColumnSelector::Ungapped(name) => write!(f, "{name:?}"),
        }
    }
}

impl fmt::Display for MsaIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MsaIndex::Row(rows) => write!(f, "[{rows}]"),
            MsaIndex::RowColumn(rows, columns) => write!(f, "[{rows}, {columns}]"),
        }
    }
}
