use std::io::Write;

use nom::{IResult, bytes::complete::take_till1, character::complete::char, multi::many1};

use crate::{
    SequenceRecord,
    error::Result,
    io::{is_any_line_break, skip_any_whitespace, skip_whitespace},
};

const LINE_WIDTH: usize = 60;

pub(crate) fn parse_fasta(input: &str) -> IResult<&str, Vec<SequenceRecord>> {
    many1(parse_record)(input)
}

fn parse_record(input: &str) -> IResult<&str, SequenceRecord> {
    let input = skip_any_whitespace(input)?;
    let input = char('>')(input)?.0;
    let input = skip_whitespace(input)?;
    let (input, label) = take_till1(is_any_line_break)(input)?;
    let (input, lines) = many1(parse_sequence_line)(input)?;

    Ok((
        input,
        SequenceRecord {
            label: label.trim_end().to_string(),
            sequence: lines.concat(),
        },
    ))
}

fn parse_sequence_line(input: &str) -> IResult<&str, &str> {
    let input = skip_any_whitespace(input)?;
    let (rest, line) = take_till1(is_any_line_break)(input)?;
    if line.starts_with('>') {
        Err(nom::Err::Error(nom::error::Error {
            input,
            code: nom::error::ErrorKind::Satisfy,
        }))
    } else {
        Ok((rest, line.trim_end()))
    }
}

pub(crate) fn write_fasta(mut writer: impl Write, records: &[SequenceRecord]) -> Result<()> {
    for record in records {
        writeln!(writer, ">{}", record.label)?;
        let mut residues = record.sequence.as_bytes();
        while !residues.is_empty() {
            let line = &residues[..residues.len().min(LINE_WIDTH)];
            writer.write_all(line)?;
            writeln!(writer)?;
            residues = &residues[line.len()..];
        }
    }
    Ok(())
}
