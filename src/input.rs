//! Console input collection, done before the pipeline starts

use std::io::{BufRead, Write};

use crate::{PlannerError, Result};

pub const DATE_QUESTION: &str = "📅 When are you planning to travel? (e.g., next Saturday): ";
pub const CITY_QUESTION: &str = "🌍 Which city would you like to visit?: ";

/// Ask `question` and read one line. Only the line ending is stripped; the
/// rest is kept exactly as typed.
pub fn prompt_line<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
) -> Result<String> {
    write!(writer, "{question}")?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(PlannerError::validation("input closed before an answer was given"));
    }
    let answer = line.trim_end_matches(['\n', '\r']).to_string();
    if answer.trim().is_empty() {
        return Err(PlannerError::validation("answer cannot be empty"));
    }
    Ok(answer)
}

/// Use `preset` when given, otherwise ask on the console
pub fn value_or_prompt<R: BufRead, W: Write>(
    preset: Option<String>,
    reader: &mut R,
    writer: &mut W,
    question: &str,
) -> Result<String> {
    match preset {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(PlannerError::validation("answer cannot be empty")),
        None => prompt_line(reader, writer, question),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_line_keeps_inner_whitespace() {
        let mut reader = Cursor::new(" New York \r\n");
        let mut out = Vec::new();
        let answer = prompt_line(&mut reader, &mut out, CITY_QUESTION).unwrap();
        assert_eq!(answer, " New York ");
        assert_eq!(String::from_utf8(out).unwrap(), CITY_QUESTION);
    }

    #[test]
    fn test_prompt_line_rejects_empty_and_eof() {
        let mut out = Vec::new();
        assert!(prompt_line(&mut Cursor::new("\n"), &mut out, DATE_QUESTION).is_err());
        assert!(prompt_line(&mut Cursor::new(""), &mut out, DATE_QUESTION).is_err());
    }

    #[test]
    fn test_value_or_prompt_prefers_preset() {
        let mut reader = Cursor::new("Rome\n");
        let mut out = Vec::new();
        let city =
            value_or_prompt(Some("Paris".into()), &mut reader, &mut out, CITY_QUESTION).unwrap();
        assert_eq!(city, "Paris");
        assert!(out.is_empty());

        let city = value_or_prompt(None, &mut reader, &mut out, CITY_QUESTION).unwrap();
        assert_eq!(city, "Rome");
    }
}
