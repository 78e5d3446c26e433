use nom::{IResult, bytes::complete::take_till1, character::complete::satisfy, multi::many0};

use crate::error::Error;

/// Consumes the rest of the current line, excluding the line break.
pub(crate) fn parse_rest_of_line(input: &str) -> IResult<&str, &str> {
    let (input, line) = take_till1(is_any_line_break)(input)?;
    Ok((input, line.trim_end()))
}

pub(crate) fn skip_whitespace(
    input: &str,
) -> std::result::Result<&str, nom::Err<nom::error::Error<&str>>> {
    many0(satisfy(is_whitespace))(input).map(|(input, _)| input)
}

pub(crate) fn skip_any_whitespace(
    input: &str,
) -> std::result::Result<&str, nom::Err<nom::error::Error<&str>>> {
    many0(satisfy(is_any_whitespace))(input).map(|(input, _)| input)
}

pub(crate) fn is_any_whitespace(c: char) -> bool {
    is_whitespace(c) || is_any_line_break(c)
}

pub(crate) fn is_whitespace(c: char) -> bool {
    c.is_whitespace() && !is_any_line_break(c)
}

pub(crate) fn is_any_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

pub(crate) fn translate_nom_error(error: nom::Err<nom::error::Error<&str>>) -> Error {
    match error {
        nom::Err::Incomplete(needed) => Error::ParserIncomplete(needed),
        nom::Err::Error(error) | nom::Err::Failure(error) => Error::Parser {
            input: error.input.to_string(),
            kind: error.code,
        },
    }
}
