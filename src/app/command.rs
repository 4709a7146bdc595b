//! Console command parser.
//!
//! Parses `/command arg` input lines into typed [`ParsedCommand`] values
//! that the event handler can act on.

/// A parsed console command. Each variant corresponds to a `/command`.
#[derive(Debug, PartialEq, Eq)]
pub enum ParsedCommand {
    Commit { name: String },
    Dispatch { name: String },
    Go { href: String },
    Back,
    State,
    Help,
    Quit,
}

/// Parse a slash-command string into a [`ParsedCommand`].
///
/// Returns `None` if the input does not start with `/`, is not a recognized
/// command, or lacks a required argument. Command words are
/// case-insensitive; arguments are kept as typed.
pub fn parse_command(input: &str) -> Option<ParsedCommand> {
    let input = input.trim();
    let rest = input.strip_prefix('/')?;

    let mut parts = rest.split_whitespace();
    let cmd = parts.next()?.to_lowercase();
    let arg = parts.next().map(str::to_string);

    match cmd.as_str() {
        "commit" | "c" => Some(ParsedCommand::Commit { name: arg? }),
        "dispatch" | "d" => Some(ParsedCommand::Dispatch { name: arg? }),
        "go" | "nav" => Some(ParsedCommand::Go {
            href: arg.unwrap_or_else(|| "#/".to_string()),
        }),
        "back" | "b" => Some(ParsedCommand::Back),
        "state" | "s" => Some(ParsedCommand::State),
        "help" | "h" | "?" => Some(ParsedCommand::Help),
        "quit" | "q" | "exit" => Some(ParsedCommand::Quit),
        _ => None,
    }
}

pub const HELP: &[&str] = &[
    "/commit <mutation>    apply a mutation now (e.g. /commit increment)",
    "/dispatch <action>    schedule an action (e.g. /dispatch increment)",
    "/go <href>            navigate (e.g. /go #/about)",
    "/back                 return to the previous view",
    "/state                show count, double and pending actions",
    "/quit                 exit",
];
