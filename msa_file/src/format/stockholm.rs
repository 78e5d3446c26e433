use std::collections::HashMap;

use nom::{
    IResult,
    bytes::complete::{tag, take_till, take_till1},
};

use crate::{
    SequenceRecord,
    io::{is_any_line_break, is_any_whitespace, parse_rest_of_line, skip_any_whitespace, skip_whitespace},
};

pub(crate) fn parse_stockholm(input: &str) -> IResult<&str, Vec<SequenceRecord>> {
    let input = skip_any_whitespace(input)?;
    let input = tag("# STOCKHOLM")(input)?.0;
    let (input, _version) = take_till(is_any_line_break)(input)?;
    parse_rows(input)
}

pub(crate) fn parse_selex(input: &str) -> IResult<&str, Vec<SequenceRecord>> {
    parse_rows(input)
}

/// Parses `label<ws>sequence` rows up to the end of the input or a `//`
/// terminator. Lines starting with `#` are markup and are skipped.
/// Interleaved blocks repeat labels; their sequence parts accumulate onto
/// the first occurrence, keeping file order.
fn parse_rows(mut input: &str) -> IResult<&str, Vec<SequenceRecord>> {
    let mut records: Vec<SequenceRecord> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    loop {
        input = skip_any_whitespace(input)?;
        if input.is_empty() || input.starts_with("//") {
            break;
        }
        if input.starts_with('#') {
            input = parse_rest_of_line(input)?.0;
            continue;
        }

        let (rest, (label, sequence)) = parse_row(input)?;
        input = rest;
        match positions.get(label) {
            Some(&position) => records[position].sequence.push_str(sequence),
            None => {
                positions.insert(label.to_string(), records.len());
                records.push(SequenceRecord {
                    label: label.to_string(),
                    sequence: sequence.to_string(),
                });
            }
        }
    }

    Ok((input, records))
}

fn parse_row(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, label) = take_till1(is_any_whitespace)(input)?;
    let input = skip_whitespace(input)?;
    let (input, sequence) = take_till1(is_any_whitespace)(input)?;
    Ok((input, (label, sequence)))
}
