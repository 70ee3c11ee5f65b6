use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, digit1, multispace0, multispace1};
use nom::combinator::{eof, opt, recognize, value};
use nom::sequence::{preceded, tuple};
use nom::IResult;

/// A line typed at the shell prompt
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    /// ADD
    Add,
    /// VIEW [start] [end] [PLOT]
    View { start: Option<String>, end: Option<String>, plot: bool },
    About,
    Help,
    Quit,
}

pub(crate) fn parse(input: &str) -> IResult<&str, Command> {
    let (input, _) = multispace0(input)?;
    let (input, command) = alt((
        value(Command::Add, tag_no_case("add")),
        view,
        value(Command::About, tag_no_case("about")),
        value(Command::Help, alt((tag_no_case("help"), tag_no_case("?")))),
        value(Command::Quit, alt((tag_no_case("quit"), tag_no_case("exit")))),
    ))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = eof(input)?;
    Ok((input, command))
}

/// `view 01-01-2024 31-01-2024 plot`, every part after `view` is optional
fn view(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_no_case("view")(input)?;
    let (input, start) = opt(preceded(multispace1, date_token))(input)?;
    let (input, end) = opt(preceded(multispace1, date_token))(input)?;
    let (input, plot) = opt(preceded(multispace1, tag_no_case("plot")))(input)?;
    Ok((input, Command::View {
        start: start.map(str::to_string),
        end: end.map(str::to_string),
        plot: plot.is_some(),
    }))
}

/// Something shaped like dd-mm-yyyy. Whether it is a real date is checked by the validator.
fn date_token(input: &str) -> IResult<&str, &str> {
    recognize(tuple((digit1, char('-'), digit1, char('-'), digit1)))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(input: &str) -> Option<Command> {
        parse(input).ok().map(|(_, c)| c)
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parsed("add"), Some(Command::Add));
        assert_eq!(parsed("  ABOUT  "), Some(Command::About));
        assert_eq!(parsed("?"), Some(Command::Help));
        assert_eq!(parsed("exit"), Some(Command::Quit));
        assert_eq!(parsed("Quit"), Some(Command::Quit));
    }

    #[test]
    fn test_view() {
        assert_eq!(parsed("view"), Some(Command::View { start: None, end: None, plot: false }));
        assert_eq!(parsed("view plot"), Some(Command::View { start: None, end: None, plot: true }));
        assert_eq!(parsed("view 01-01-2024 31-01-2024"), Some(Command::View {
            start: Some("01-01-2024".to_string()),
            end: Some("31-01-2024".to_string()),
            plot: false,
        }));
        assert_eq!(parsed("VIEW 01-01-2024  plot "), Some(Command::View {
            start: Some("01-01-2024".to_string()),
            end: None,
            plot: true,
        }));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(parsed("address"), None);
        assert_eq!(parsed("view january"), None);
        assert_eq!(parsed("add 5"), None);
        assert_eq!(parsed(""), None);
    }
}
