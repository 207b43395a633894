//! Line command parsing.
//!
//! The terminal front end reads one line at a time. How a line is read
//! depends on the current [`Screen`]:
//!
//! | Screen  | Commands |
//! |---------|----------|
//! | Notes   | `/text`, `s [text]`, `n`, `p`, `g N`, `t [TAG]`, `c`, `v N`, `r`, `q` |
//! | Compose | `title …`, `content …`, `tag …`, `submit`, `cancel` |
//! | Detail  | `b`, `r`, `q` |

use super::handler::Event;
use super::modes::Screen;
use crate::domain::Field;

/// Parses one input line into an event.
///
/// Returns `None` for blank lines. Lines that are not a command on `screen`
/// become [`Event::Unrecognized`].
///
/// # Examples
///
/// ```
/// use notehub::app::{parse_command, Event, Screen};
///
/// assert_eq!(parse_command("/milk", Screen::Notes), Some(Event::SearchInput("milk".into())));
/// assert_eq!(parse_command("g 3", Screen::Notes), Some(Event::GoToPage(3)));
/// assert_eq!(parse_command("   ", Screen::Notes), None);
/// ```
#[must_use]
pub fn parse_command(line: &str, screen: Screen) -> Option<Event> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }

    let event = match screen {
        Screen::Notes => parse_notes(line),
        Screen::Compose => parse_compose(line),
        Screen::Detail => parse_detail(line),
    };
    Some(event.unwrap_or_else(|| Event::Unrecognized(line.trim().to_string())))
}

/// Splits `"cmd rest"` into the command word and the untrimmed remainder
/// after a single separating space.
fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim_start();
    match line.split_once(' ') {
        Some((cmd, rest)) => (cmd, rest),
        None => (line, ""),
    }
}

fn parse_notes(line: &str) -> Option<Event> {
    if let Some(search) = line.trim_start().strip_prefix('/') {
        return Some(Event::SearchInput(search.to_string()));
    }

    let (cmd, rest) = split_command(line);
    let arg = rest.trim();
    match cmd {
        "s" => Some(Event::SearchInput(rest.to_string())),
        "n" if arg.is_empty() => Some(Event::NextPage),
        "p" if arg.is_empty() => Some(Event::PrevPage),
        "g" => arg.parse().ok().map(Event::GoToPage),
        "t" => Some(Event::OpenRoute {
            tag: (!arg.is_empty()).then(|| arg.to_string()),
        }),
        "c" if arg.is_empty() => Some(Event::OpenCompose),
        "v" => arg.parse().ok().map(|index| Event::OpenNote { index }),
        "r" if arg.is_empty() => Some(Event::Retry),
        "q" if arg.is_empty() => Some(Event::Quit),
        _ => None,
    }
}

fn parse_compose(line: &str) -> Option<Event> {
    let (cmd, rest) = split_command(line);
    let field = match cmd {
        "title" => Field::Title,
        // `\n` in typed content stands for a line break.
        "content" => {
            return Some(Event::EditField {
                field: Field::Content,
                value: rest.replace("\\n", "\n"),
            })
        }
        "tag" => Field::Tag,
        "submit" if rest.trim().is_empty() => return Some(Event::SubmitNote),
        "cancel" if rest.trim().is_empty() => return Some(Event::CloseCompose),
        _ => return None,
    };
    Some(Event::EditField {
        field,
        value: rest.trim().to_string(),
    })
}

fn parse_detail(line: &str) -> Option<Event> {
    match line.trim() {
        "b" => Some(Event::CloseNote),
        "r" => Some(Event::Retry),
        "q" => Some(Event::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(line: &str) -> Option<Event> {
        parse_command(line, Screen::Notes)
    }

    #[test]
    fn search_forms() {
        assert_eq!(notes("/milk tea"), Some(Event::SearchInput("milk tea".into())));
        assert_eq!(notes("s  padded"), Some(Event::SearchInput(" padded".into())));
        assert_eq!(notes("s"), Some(Event::SearchInput(String::new())));
        assert_eq!(notes("/"), Some(Event::SearchInput(String::new())));
    }

    #[test]
    fn navigation_commands() {
        assert_eq!(notes("n"), Some(Event::NextPage));
        assert_eq!(notes("p\n"), Some(Event::PrevPage));
        assert_eq!(notes("g 4"), Some(Event::GoToPage(4)));
        assert_eq!(notes("g four"), Some(Event::Unrecognized("g four".into())));
        assert_eq!(notes("v 2"), Some(Event::OpenNote { index: 2 }));
    }

    #[test]
    fn tag_routes() {
        assert_eq!(notes("t work"), Some(Event::OpenRoute { tag: Some("work".into()) }));
        assert_eq!(notes("t"), Some(Event::OpenRoute { tag: None }));
    }

    #[test]
    fn compose_fields_keep_inner_spaces() {
        assert_eq!(
            parse_command("title  Weekly  sync ", Screen::Compose),
            Some(Event::EditField {
                field: Field::Title,
                value: "Weekly  sync".into()
            })
        );
        assert_eq!(
            parse_command("content a\\nb", Screen::Compose),
            Some(Event::EditField {
                field: Field::Content,
                value: "a\nb".into()
            })
        );
        assert_eq!(parse_command("submit", Screen::Compose), Some(Event::SubmitNote));
        assert_eq!(parse_command("cancel", Screen::Compose), Some(Event::CloseCompose));
    }

    #[test]
    fn commands_are_screen_specific() {
        assert_eq!(parse_command("n", Screen::Compose), Some(Event::Unrecognized("n".into())));
        assert_eq!(parse_command("b", Screen::Detail), Some(Event::CloseNote));
        assert_eq!(notes("b"), Some(Event::Unrecognized("b".into())));
    }
}
