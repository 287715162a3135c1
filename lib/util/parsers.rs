use nom::character::complete::one_of;
use nom::{IResult, Parser};

/// Parses a single board coordinate digit (`0`–`7`).
pub fn coord(input: &str) -> IResult<&str, u8> {
    one_of("01234567").map(|c| c as u8 - b'0').parse(input)
}
