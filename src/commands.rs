//! Built-in REPL commands prefixed with `/`.

use crate::navigator::history::SessionHistory;

/// Session state available to built-in commands.
pub struct SessionInfo<'a> {
    pub server: &'a str,
    pub history: &'a SessionHistory,
    /// Predictions the server accepted this session.
    pub accepted: usize,
}

/// Result of command handling.
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Not a command — treat the input as a prediction.
    NotACommand,
    /// Command handled, continue the REPL loop.
    Handled,
    /// Exit the REPL.
    Quit,
}

struct Command {
    name: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
    run: fn(&SessionInfo) -> CommandResult,
}

const COMMANDS: &[Command] = &[
    Command {
        name: "/help",
        aliases: &["/h", "/?"],
        description: "show this help",
        run: cmd_help,
    },
    Command {
        name: "/where",
        aliases: &["/pwd"],
        description: "show the current location",
        run: cmd_where,
    },
    Command {
        name: "/history",
        aliases: &[],
        description: "list visited locations",
        run: cmd_history,
    },
    Command {
        name: "/server",
        aliases: &[],
        description: "show the server and session count",
        run: cmd_server,
    },
    Command {
        name: "/quit",
        aliases: &["quit", "exit", "/exit"],
        description: "exit the REPL",
        run: cmd_quit,
    },
];

/// Try to handle input as a built-in command.
pub fn handle_command(input: &str, info: &SessionInfo<'_>) -> CommandResult {
    let cmd = input.trim();

    for command in COMMANDS {
        if cmd == command.name || command.aliases.contains(&cmd) {
            return (command.run)(info);
        }
    }

    if cmd.starts_with('/') {
        println!("unknown command: {cmd}");
        println!("type /help for available commands");
        return CommandResult::Handled;
    }

    CommandResult::NotACommand
}

fn cmd_help(_info: &SessionInfo) -> CommandResult {
    let max_width = COMMANDS
        .iter()
        .map(|c| format_command_name(c.name, c.aliases).len())
        .max()
        .unwrap_or(10);

    println!("  type a number, `real` or `fake` to submit a prediction");
    for command in COMMANDS {
        let name = format_command_name(command.name, command.aliases);
        println!("  {name:<max_width$}  {}", command.description);
    }
    CommandResult::Handled
}

fn format_command_name(name: &str, aliases: &[&str]) -> String {
    if aliases.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, aliases.join(", "))
    }
}

fn cmd_where(info: &SessionInfo) -> CommandResult {
    match info.history.current() {
        Ok(Some(url)) => println!("  {url}"),
        Ok(None) => println!("  (nowhere yet)"),
        Err(e) => eprintln!("  ✗ failed to read history: {e}"),
    }
    CommandResult::Handled
}

fn cmd_history(info: &SessionInfo) -> CommandResult {
    match info.history.entries() {
        Ok(entries) if entries.is_empty() => println!("  (empty)"),
        Ok(entries) => {
            for entry in entries {
                println!("  {}  {}", entry.timestamp, entry.url);
            }
        }
        Err(e) => eprintln!("  ✗ failed to read history: {e}"),
    }
    CommandResult::Handled
}

fn cmd_server(info: &SessionInfo) -> CommandResult {
    println!("  server    {}", info.server);
    println!("  accepted  {}", info.accepted);
    CommandResult::Handled
}

fn cmd_quit(_info: &SessionInfo) -> CommandResult {
    CommandResult::Quit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_info(f: impl FnOnce(&SessionInfo)) {
        let history = SessionHistory::in_memory().unwrap();
        let info = SessionInfo {
            server: "http://127.0.0.1:5000",
            history: &history,
            accepted: 0,
        };
        f(&info);
    }

    #[test]
    fn help_is_handled() {
        with_info(|info| {
            for input in ["/help", "/h", "/?"] {
                assert_eq!(handle_command(input, info), CommandResult::Handled);
            }
        });
    }

    #[test]
    fn where_is_handled_with_and_without_history() {
        let history = SessionHistory::in_memory().unwrap();
        let info = SessionInfo {
            server: "http://127.0.0.1:5000",
            history: &history,
            accepted: 1,
        };
        assert_eq!(handle_command("/where", &info), CommandResult::Handled);
        history.visit("/3").unwrap();
        assert_eq!(handle_command("/pwd", &info), CommandResult::Handled);
    }

    #[test]
    fn history_and_server_are_handled() {
        with_info(|info| {
            assert_eq!(handle_command("/history", info), CommandResult::Handled);
            assert_eq!(handle_command("/server", info), CommandResult::Handled);
        });
    }

    #[test]
    fn unknown_slash_command_is_handled() {
        with_info(|info| {
            assert_eq!(handle_command("/foobar", info), CommandResult::Handled);
        });
    }

    #[test]
    fn predictions_are_not_commands() {
        with_info(|info| {
            for input in ["1", "0", "real", "fake", "0.5"] {
                assert_eq!(handle_command(input, info), CommandResult::NotACommand);
            }
        });
    }

    #[test]
    fn quit_aliases_work() {
        with_info(|info| {
            for input in ["/quit", "quit", "exit", "/exit", "  /quit  "] {
                assert_eq!(handle_command(input, info), CommandResult::Quit);
            }
        });
    }

    #[test]
    fn no_duplicate_names_or_aliases() {
        let mut seen: Vec<&str> = Vec::new();
        for cmd in COMMANDS {
            for name in std::iter::once(&cmd.name).chain(cmd.aliases.iter()) {
                assert!(!seen.contains(name), "duplicate command name: {name}");
                seen.push(name);
            }
        }
    }
}
