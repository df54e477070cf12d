//! Numbered-choice prompts for disambiguation and picking.

use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Ask the user to pick one of `options` on the terminal.
///
/// Returns the chosen index, or `None` if the user cancels (empty input or
/// end of input).
pub(crate) fn choose(question: &str, options: &[String]) -> io::Result<Option<usize>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    choose_from(&mut input, &mut output, question, options)
}

pub(crate) fn choose_from<R, W>(
    input: &mut R,
    output: &mut W,
    question: &str,
    options: &[String],
) -> io::Result<Option<usize>>
where
    R: BufRead,
    W: Write,
{
    if options.is_empty() {
        return Ok(None);
    }

    writeln!(output, "{}", question.if_supports_color(Stdout, |t| t.bold()))?;
    for (i, option) in options.iter().enumerate() {
        writeln!(
            output,
            "  {} {}",
            format!("{})", i + 1).if_supports_color(Stdout, |t| t.cyan()),
            option
        )?;
    }

    loop {
        write!(output, "Choice [1-{}, Enter to cancel]: ", options.len())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        match trimmed.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(n - 1)),
            _ => writeln!(
                output,
                "  {}",
                "Enter one of the numbers above.".if_supports_color(Stdout, |t| t.yellow())
            )?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["Hades".into(), "Hades II".into()]
    }

    fn run(input: &str) -> (Option<usize>, String) {
        let mut reader = input.as_bytes();
        let mut out = Vec::new();
        let choice = choose_from(&mut reader, &mut out, "Which one?", &options()).unwrap();
        (choice, String::from_utf8(out).unwrap())
    }

    #[test]
    fn picks_by_number() {
        let (choice, out) = run("2\n");
        assert_eq!(choice, Some(1));
        assert!(out.contains("Hades II"));
    }

    #[test]
    fn empty_line_cancels() {
        assert_eq!(run("\n").0, None);
    }

    #[test]
    fn end_of_input_cancels() {
        assert_eq!(run("").0, None);
    }

    #[test]
    fn retries_after_bad_input() {
        let (choice, out) = run("7\nabc\n1\n");
        assert_eq!(choice, Some(0));
        assert_eq!(out.matches("Enter one of the numbers above.").count(), 2);
    }

    #[test]
    fn no_options_returns_none() {
        let mut reader = "1\n".as_bytes();
        let mut out = Vec::new();
        assert_eq!(choose_from(&mut reader, &mut out, "?", &[]).unwrap(), None);
        assert!(out.is_empty());
    }
}
