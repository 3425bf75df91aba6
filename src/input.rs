//! Reading map positions typed by a user.
//!
//! Positions are percentages of the map extent, 0 to 100 on each axis.

use crate::error::{PlannerError, Result};
use std::io::{BufRead, Write};

/// Parse a percentage in [0, 100].
pub fn parse_percentage(text: &str) -> Result<f32> {
    let value: f32 = text
        .trim()
        .parse()
        .map_err(|_| PlannerError::Input(format!("'{}' is not a number", text.trim())))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(PlannerError::Input(format!("{} is outside 0-100", value)));
    }
    Ok(value)
}

/// Ask for a percentage until a valid one is entered.
///
/// Fails only if `input` hits end of file or an I/O error.
pub fn prompt_percentage<R: BufRead, W: Write>(label: &str, input: &mut R, output: &mut W) -> Result<f32> {
    loop {
        write!(output, "Enter {} (0-100): ", label)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(PlannerError::Input(format!("no value given for {}", label)));
        }

        match parse_percentage(&line) {
            Ok(value) => return Ok(value),
            Err(e) => writeln!(output, "{}", e)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn accepts_bounds_and_whitespace() {
        assert_eq!(parse_percentage("0").unwrap(), 0.0);
        assert_eq!(parse_percentage(" 100 \n").unwrap(), 100.0);
        assert_eq!(parse_percentage("42.5").unwrap(), 42.5);
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert!(parse_percentage("-0.1").is_err());
        assert!(parse_percentage("100.5").is_err());
        assert!(parse_percentage("ten").is_err());
        assert!(parse_percentage("").is_err());
        assert!(parse_percentage("NaN").is_err());
    }

    #[test]
    fn prompt_retries_until_valid() {
        let mut input = Cursor::new("abc\n150\n37\n");
        let mut output = Vec::new();

        let value = prompt_percentage("start x", &mut input, &mut output).unwrap();
        assert_eq!(value, 37.0);

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Enter start x (0-100): ").count(), 3);
        assert!(text.contains("not a number"));
        assert!(text.contains("outside 0-100"));
    }

    #[test]
    fn prompt_fails_on_end_of_input() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert!(prompt_percentage("end y", &mut input, &mut output).is_err());
    }
}
