//! Line-based interactive input and output.

use std::io::{self, BufRead, Stdin, Stdout, Write};

use crate::error::CalendarError;

/// Blocking question-and-answer channel with the user.
pub trait Prompter {
    /// Print a line of text for the user.
    fn say(&mut self, message: &str) -> Result<(), CalendarError>;

    /// Show `question` without a line break and read one answer line.
    /// The answer is trimmed; end of input reads as an empty answer.
    fn ask(&mut self, question: &str) -> Result<String, CalendarError>;

    /// Yes/no question. Only `y` (any case) counts as yes.
    fn confirm(&mut self, question: &str) -> Result<bool, CalendarError> {
        Ok(self.ask(question)?.eq_ignore_ascii_case("y"))
    }
}

/// [`Prompter`] over any reader/writer pair, normally stdin and stdout.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl LinePrompter<io::StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        LinePrompter::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LinePrompter { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn say(&mut self, message: &str) -> Result<(), CalendarError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String, CalendarError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }
}

/// Ask for a year. Anything that is not an integer gives `fallback`.
pub fn ask_year<P: Prompter + ?Sized>(
    prompter: &mut P,
    fallback: i32,
) -> Result<i32, CalendarError> {
    let answer = prompter.ask(&format!("年を入力してください (例: {fallback}): "))?;
    Ok(answer.parse().unwrap_or(fallback))
}

/// Ask for a month. Anything that is not an integer gives `fallback`; an
/// integer outside 1-12 is `InvalidMonth`.
pub fn ask_month<P: Prompter + ?Sized>(
    prompter: &mut P,
    fallback: u32,
) -> Result<u32, CalendarError> {
    let answer = prompter.ask("月を入力してください (1-12): ")?;
    match answer.parse::<i64>() {
        Ok(month) => check_month(month),
        Err(_) => Ok(fallback),
    }
}

/// Accept a month number in 1-12.
pub fn check_month(month: i64) -> Result<u32, CalendarError> {
    if (1..=12).contains(&month) {
        Ok(month as u32)
    } else {
        Err(CalendarError::InvalidMonth { month })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompter(input: &str) -> LinePrompter<&[u8], Vec<u8>> {
        LinePrompter::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn ask_trims_and_echoes_question() {
        let mut p = prompter("  hello \nworld\n");
        assert_eq!(p.ask("q1? ").unwrap(), "hello");
        assert_eq!(p.ask("q2? ").unwrap(), "world");
        assert_eq!(p.ask("q3? ").unwrap(), "");
        assert_eq!(String::from_utf8(p.into_output()).unwrap(), "q1? q2? q3? ");
    }

    #[test]
    fn confirm_accepts_only_y() {
        let mut p = prompter("y\nY\nyes\nn\n\n");
        assert_eq!(true, p.confirm("?").unwrap());
        assert_eq!(true, p.confirm("?").unwrap());
        assert_eq!(false, p.confirm("?").unwrap());
        assert_eq!(false, p.confirm("?").unwrap());
        assert_eq!(false, p.confirm("?").unwrap());
        assert_eq!(false, p.confirm("?").unwrap());
    }

    #[test]
    fn year_falls_back_when_not_numeric() {
        assert_eq!(ask_year(&mut prompter("1999\n"), 2025).unwrap(), 1999);
        assert_eq!(ask_year(&mut prompter("next\n"), 2025).unwrap(), 2025);
        assert_eq!(ask_year(&mut prompter(""), 2030).unwrap(), 2030);
    }

    #[test]
    fn month_validation() {
        assert_eq!(ask_month(&mut prompter("12\n"), 1).unwrap(), 12);
        assert_eq!(ask_month(&mut prompter("march\n"), 1).unwrap(), 1);
        assert!(matches!(
            ask_month(&mut prompter("13\n"), 1),
            Err(CalendarError::InvalidMonth { month: 13 })
        ));
        assert!(matches!(
            ask_month(&mut prompter("-1\n"), 1),
            Err(CalendarError::InvalidMonth { month: -1 })
        ));
        assert!(matches!(
            check_month(0),
            Err(CalendarError::InvalidMonth { month: 0 })
        ));
    }
}
