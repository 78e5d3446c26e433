use msa_file::{MsaFile, format::Format};
use ndarray::arr2;

use crate::{
    error::Error,
    msa::{Msa, iter::Sequence},
};

fn sample() -> Msa {
    Msa::from_records(
        "piwi",
        [
            ("P1/1-5".to_string(), "AC-GT".to_string()),
            ("P2/1-5".to_string(), "ACTGT".to_string()),
        ],
    )
    .unwrap()
}

fn sequence(name: &str, residues: &str, start: u32, end: u32) -> Sequence {
    Sequence {
        name: name.to_string(),
        residues: residues.to_string(),
        start,
        end,
    }
}

#[test]
fn row_by_position_decodes_the_label() {
    let msa = sample();
    assert_eq!(
        msa.get(0usize).unwrap().into_sequence().unwrap(),
        sequence("P1", "AC-GT", 1, 5)
    );
    assert_eq!(
        msa.get(1usize).unwrap().into_sequence().unwrap(),
        sequence("P2", "ACTGT", 1, 5)
    );
}

#[test]
fn label_and_position_address_the_same_row() {
    let msa = sample();
    assert_eq!(msa.get("P1").unwrap(), msa.get(0usize).unwrap());
    assert_eq!(msa.get("P2").unwrap(), msa.get(1usize).unwrap());
}

#[test]
fn every_row_has_residue_count_characters() {
    let msa = sample();
    for row in 0..msa.sequence_count() {
        let sequence = msa.get(row).unwrap().into_sequence().unwrap();
        assert_eq!(sequence.residues.len(), msa.residue_count());
    }
}

#[test]
fn single_residue() {
    let msa = sample();
    assert_eq!(msa.get((0usize, 2usize)).unwrap().into_residue(), Some('-'));
    assert_eq!(msa.get((1usize, 2usize)).unwrap().into_residue(), Some('T'));
}

#[test]
fn partial_row_is_a_bare_string() {
    let msa = sample();
    assert_eq!(
        msa.get((0usize, 1..4)).unwrap().into_residues().unwrap(),
        "C-G"
    );
    assert_eq!(
        msa.get((0usize, vec![4usize, 0])).unwrap().into_residues().unwrap(),
        "TA"
    );
}

#[test]
fn single_column_reads_downwards() {
    let msa = sample();
    assert_eq!(
        msa.get((0..2, 1usize)).unwrap().into_residues().unwrap(),
        "CC"
    );
}

#[test]
fn row_span_derives_an_alignment() {
    let msa = sample();
    let derived = msa.get(0..2).unwrap().into_alignment().unwrap();
    assert_eq!(derived.title(), "piwi'");
    assert_eq!(derived.sequence_count(), 2);
    assert_eq!(derived.residue_count(), 5);
    assert_eq!(derived.full_label(0usize).unwrap(), "P1/1-5");
    assert_eq!(derived, msa);
}

#[test]
fn span_and_equivalent_label_list_select_the_same_grid() {
    let msa = sample();
    let by_span = msa.get(0..2).unwrap().into_alignment().unwrap();
    let by_labels = msa
        .get(vec!["P1", "P2"])
        .unwrap()
        .into_alignment()
        .unwrap();
    assert_eq!(by_span, by_labels);
}

#[test]
fn column_pruning_by_label() {
    let msa = sample();
    let pruned = msa.get((.., "P1")).unwrap().into_alignment().unwrap();

    let gaps = msa
        .get(0usize)
        .unwrap()
        .into_sequence()
        .unwrap()
        .residues
        .chars()
        .filter(|residue| !residue.is_alphabetic())
        .count();
    assert_eq!(pruned.residue_count(), msa.residue_count() - gaps);

    assert_eq!(
        pruned.get(0usize).unwrap().into_sequence().unwrap().residues,
        "ACGT"
    );
    assert_eq!(
        pruned.get(1usize).unwrap().into_sequence().unwrap().residues,
        "ACGT"
    );
    assert_eq!(pruned.to_array(), arr2(&[*b"ACGT", *b"ACGT"]));
}

#[test]
fn row_and_column_spans_combine() {
    let msa = sample();
    let derived = msa.get((0..2, 1..4)).unwrap().into_alignment().unwrap();
    assert_eq!(derived.to_array(), arr2(&[*b"C-G", *b"CTG"]));
    assert_eq!(derived.full_label("P2").unwrap(), "P2/1-5");
}

#[test]
fn membership_is_exact_on_base_names() {
    let msa = sample();
    assert!(msa.contains("P1"));
    assert!(msa.contains("P2"));
    assert!(!msa.contains("P3"));
    assert!(!msa.contains("P1/1-5"));
    assert!(!msa.contains(""));
}

#[test]
fn equality_ignores_labels_and_title() {
    let msa = sample();
    let relabeled = Msa::from_records(
        "other",
        [
            ("X/2-6".to_string(), "AC-GT".to_string()),
            ("Y".to_string(), "ACTGT".to_string()),
        ],
    )
    .unwrap();
    assert_eq!(msa, relabeled);

    let changed = Msa::from_records(
        "piwi",
        [
            ("P1/1-5".to_string(), "AC-GA".to_string()),
            ("P2/1-5".to_string(), "ACTGT".to_string()),
        ],
    )
    .unwrap();
    assert_ne!(msa, changed);
}

#[test]
fn iteration_round_trips_through_a_derived_view() {
    let msa = sample();
    let rows = vec![1usize, 0];
    let derived = msa.get(rows.clone()).unwrap().into_alignment().unwrap();

    let from_derived: Vec<Sequence> = derived.iter().collect();
    let from_parent: Vec<Sequence> = rows
        .iter()
        .map(|&row| msa.get(row).unwrap().into_sequence().unwrap())
        .collect();
    assert_eq!(from_derived, from_parent);
}

#[test]
fn iteration_is_restartable_and_sized() {
    let msa = sample();
    assert_eq!(msa.iter().len(), 2);
    assert_eq!(msa.iter().count(), 2);
    assert_eq!(msa.iter().count(), 2);
    let names: Vec<String> = (&msa).into_iter().map(|sequence| sequence.name).collect();
    assert_eq!(names, ["P1", "P2"]);
}

#[test]
fn duplicate_base_names_shadow_earlier_rows() {
    let msa = Msa::from_records(
        "dup",
        [
            ("P1/1-5".to_string(), "AC-GT".to_string()),
            ("P1/6-10".to_string(), "ACTGT".to_string()),
        ],
    )
    .unwrap();

    assert_eq!(msa.sequence_count(), 2);
    assert_eq!(
        msa.get("P1").unwrap().into_sequence().unwrap(),
        sequence("P1", "ACTGT", 6, 10)
    );
    assert_eq!(
        msa.get(0usize).unwrap().into_sequence().unwrap(),
        sequence("P1", "AC-GT", 1, 5)
    );
}

#[test]
fn label_accessors_resolve_keys_both_ways() {
    let msa = sample();
    assert_eq!(msa.label(0usize).unwrap(), "P1");
    assert_eq!(msa.label("P1").unwrap(), "P1");
    assert_eq!(msa.full_label("P1").unwrap(), "P1/1-5");
    assert_eq!(msa.residue_range("P2").unwrap(), (1, 5));
    assert!(matches!(
        msa.label("P3"),
        Err(Error::InvalidIndex(_))
    ));
    assert!(matches!(
        msa.full_label(7usize),
        Err(Error::InvalidIndex(_))
    ));
}

#[test]
fn invalid_indices_name_the_expression() {
    let msa = sample();
    assert!(matches!(
        msa.get("P3"),
        Err(Error::InvalidIndex(expression)) if expression.contains("P3")
    ));
    assert!(matches!(
        msa.get((0usize, 99usize)),
        Err(Error::InvalidIndex(_))
    ));
    assert!(matches!(
        msa.get(vec![0usize, 9]),
        Err(Error::InvalidIndex(_))
    ));
    assert!(matches!(
        msa.get(vec!["P1", "P3"]),
        Err(Error::InvalidIndex(_))
    ));
    assert!(matches!(
        msa.get((0usize, vec![true, false])),
        Err(Error::InvalidIndex(_))
    ));
}

#[test]
fn out_of_range_spans_clamp_like_slices() {
    let msa = sample();
    let clamped = msa.get(0..10).unwrap().into_alignment().unwrap();
    assert_eq!(clamped.sequence_count(), 2);

    let empty = msa.get(5..9).unwrap().into_alignment().unwrap();
    assert_eq!(empty.sequence_count(), 0);
    assert_eq!(empty.residue_count(), 5);
}

#[test]
fn mask_columns() {
    let msa = sample();
    let masked = msa
        .get((0usize, vec![true, false, true, false, true]))
        .unwrap()
        .into_residues()
        .unwrap();
    assert_eq!(masked, "A-T");
}

#[test]
fn from_array_checks_label_count() {
    let grid = arr2(&[*b"AC", *b"GT"]);
    assert!(matches!(
        Msa::from_array(grid, vec!["only one".to_string()], "bad"),
        Err(Error::LabelCountMismatch {
            labels: 1,
            sequences: 2,
        })
    ));
}

#[test]
fn unlabeled_grids_have_no_name_access() {
    let msa = Msa::from_array(arr2(&[*b"AC", *b"GT"]), Vec::new(), "raw").unwrap();
    assert!(!msa.contains(""));
    assert_eq!(
        msa.get(0usize).unwrap().into_sequence().unwrap(),
        sequence("", "AC", 0, 0)
    );
    assert!(matches!(msa.get("AC"), Err(Error::InvalidIndex(_))));
}

#[test]
fn ragged_records_are_rejected() {
    let result = Msa::from_records(
        "ragged",
        [
            ("P1".to_string(), "ACGTA".to_string()),
            ("P2".to_string(), "ACGT".to_string()),
        ],
    );
    assert!(matches!(
        result,
        Err(Error::SequenceLengthMismatch {
            expected: 5,
            actual: 4,
            ..
        })
    ));
}

#[test]
fn empty_sources_are_rejected() {
    assert!(matches!(
        Msa::from_records("empty", []),
        Err(Error::EmptyAlignment)
    ));
}

#[test]
fn construction_from_a_parsed_source() {
    let file = MsaFile::read(
        ">P1/1-5\nAC-GT\n>P2/1-5\nACTGT\n".as_bytes(),
        Format::Fasta,
        "piwi",
    )
    .unwrap();
    let msa = Msa::from_source(file).unwrap();
    assert_eq!(msa.title(), "piwi");
    assert_eq!(msa, sample());
}

#[test]
fn unreadable_paths_report_an_unrecognized_source() {
    assert!(matches!(
        Msa::from_file("/nonexistent/alignment.fasta"),
        Err(Error::UnrecognizedSource(_))
    ));
}

#[test]
fn copies_of_the_grid_are_independent() {
    let msa = sample();
    let mut copy = msa.to_array();
    copy[[0, 0]] = b'Z';
    assert_eq!(msa.get((0usize, 0usize)).unwrap().into_residue(), Some('A'));
}

#[test]
fn display_summarizes_the_alignment() {
    let mut msa = sample();
    assert_eq!(msa.to_string(), "MSA piwi (2 sequences, 5 residues)");
    msa.set_title("renamed");
    assert_eq!(msa.title(), "renamed");
}
