use crate::msa::index::{ColumnSelector, MsaIndex, RowSelector, Span};

#[test]
fn conversions_cover_the_index_forms() {
    assert_eq!(MsaIndex::from(3usize), MsaIndex::Row(RowSelector::Position(3)));
    assert_eq!(
        MsaIndex::from("P1"),
        MsaIndex::Row(RowSelector::Label("P1".to_string()))
    );
    assert_eq!(
        MsaIndex::from(vec![1usize, 0]),
        MsaIndex::Row(RowSelector::Positions(vec![1, 0]))
    );
    assert_eq!(
        MsaIndex::from(vec!["P1", "P2"]),
        MsaIndex::Row(RowSelector::Labels(vec![
            "P1".to_string(),
            "P2".to_string(),
        ]))
    );
    assert_eq!(
        MsaIndex::from((1usize, 2usize)),
        MsaIndex::RowColumn(RowSelector::Position(1), ColumnSelector::Position(2))
    );
    assert_eq!(
        MsaIndex::from((.., "P1")),
        MsaIndex::RowColumn(
            RowSelector::Range(Span {
                start: None,
                end: None,
            }),
            ColumnSelector::Ungapped("P1".to_string()),
        )
    );
    assert_eq!(
        MsaIndex::from((0..2, vec![true, false])),
        MsaIndex::RowColumn(
            RowSelector::Range(Span {
                start: Some(0),
                end: Some(2),
            }),
            ColumnSelector::Mask(vec![true, false]),
        )
    );
}

#[test]
fn inclusive_ranges_convert_to_half_open_spans() {
    assert_eq!(
        Span::from(1..=3),
        Span {
            start: Some(1),
            end: Some(4),
        }
    );
    assert_eq!(
        Span::from(..=3),
        Span {
            start: None,
            end: Some(4),
        }
    );
}

#[test]
fn expressions_display_like_the_caller_wrote_them() {
    assert_eq!(MsaIndex::from("P1").to_string(), "[\"P1\"]");
    assert_eq!(MsaIndex::from(0..2).to_string(), "[0..2]");
    assert_eq!(MsaIndex::from((.., "P1")).to_string(), "[.., \"P1\"]");
    assert_eq!(
        MsaIndex::from((vec![1usize, 0], 3usize)).to_string(),
        "[[1, 0], 3]"
    );
}
