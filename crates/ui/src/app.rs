use std::io::{self, BufRead, Write};

use murmur_storage::{Seed, StorageError};
use snafu::{ResultExt, Snafu};

use crate::chat::{
    Alignment, BackRequested, ChatEvent, ChatFrame, ChatView, ComposeGateway, ContactSelected,
    LayoutChanged, PLACEHOLDER_PROMPT, ROSTER_TITLE, ReadMarker, SEARCH_PLACEHOLDER,
    SearchChanged, Submit, TimelineView,
};
use crate::settings::ViewSettings;

pub const PROMPT: &str = "> ";

const HELP: &str = "\
commands:
  select <id>      open the conversation with a contact
  send <text>      send text to the open conversation
  back             return to the roster (narrow layout only)
  narrow on|off    switch the layout breakpoint
  search <text>    edit the roster search field
  show             print the current frame
  help             print this help
  quit             leave";

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Event(ChatEvent),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CommandError {
    #[snafu(display("unknown command '{command}', try 'help'"))]
    UnknownCommand { command: String },
    #[snafu(display("'{command}' needs an argument"))]
    MissingArgument { command: &'static str },
    #[snafu(display("expected 'on' or 'off', got '{value}'"))]
    InvalidToggle { value: String },
}

impl ShellCommand {
    /// Parses one input line. Blank lines yield `None`.
    ///
    /// `send` and `search` keep everything after the first separating whitespace verbatim.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            return Ok(None);
        }

        let line = line.trim_start();
        let (command, rest) = match line.find(|c: char| c.is_ascii_whitespace()) {
            Some(split) => (&line[..split], &line[split + 1..]),
            None => (line, ""),
        };

        let parsed = match command {
            "select" => {
                let contact_id = rest.trim();
                if contact_id.is_empty() {
                    return MissingArgumentSnafu { command: "select" }.fail();
                }
                Self::Event(ContactSelected::new(contact_id).into())
            }
            "send" => Self::Event(Submit::new(rest).into()),
            "search" => Self::Event(SearchChanged::new(rest).into()),
            "back" => Self::Event(BackRequested.into()),
            "narrow" => {
                let narrow_mode = match rest.trim() {
                    "on" => true,
                    "off" => false,
                    "" => return MissingArgumentSnafu { command: "narrow" }.fail(),
                    other => {
                        return InvalidToggleSnafu {
                            value: other.to_string(),
                        }
                        .fail();
                    }
                };
                Self::Event(LayoutChanged { narrow_mode }.into())
            }
            "show" => Self::Show,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => {
                return UnknownCommandSnafu {
                    command: other.to_string(),
                }
                .fail();
            }
        };
        Ok(Some(parsed))
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ShellError {
    #[snafu(display("failed to load contact directory on `{stage}`: {source}"))]
    LoadSeed {
        stage: &'static str,
        source: StorageError,
    },
    #[snafu(display("terminal i/o failed on `{stage}`: {source}"))]
    Terminal {
        stage: &'static str,
        source: io::Error,
    },
}

/// Builds the chat view described by `settings`.
pub fn bootstrap(settings: &ViewSettings) -> Result<ChatView, ShellError> {
    let seed = match settings.seed_path.as_deref() {
        Some(path) => {
            tracing::info!("loading seed from {:?}", path);
            murmur_storage::load_seed_file(path).context(LoadSeedSnafu {
                stage: "load-seed-file",
            })?
        }
        None => {
            tracing::info!("no seed file configured, using demo roster");
            murmur_storage::demo()
        }
    };

    Ok(view_from_seed(seed, settings))
}

pub fn view_from_seed(seed: Seed, settings: &ViewSettings) -> ChatView {
    ChatView::new(
        seed,
        settings.narrow_mode,
        ComposeGateway::new(settings.clock),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlow {
    Continue,
    Quit,
}

/// Line-driven stand-in for a render surface.
pub struct ChatAppShell<W> {
    view: ChatView,
    out: W,
}

impl<W: Write> ChatAppShell<W> {
    pub fn new(view: ChatView, out: W) -> Self {
        Self { view, out }
    }

    pub fn view(&self) -> &ChatView {
        &self.view
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn execute(&mut self, command: ShellCommand) -> Result<ShellFlow, ShellError> {
        match command {
            ShellCommand::Quit => return Ok(ShellFlow::Quit),
            ShellCommand::Help => {
                writeln!(self.out, "{HELP}").context(TerminalSnafu {
                    stage: "write-help",
                })?;
                return Ok(ShellFlow::Continue);
            }
            ShellCommand::Show => {}
            ShellCommand::Event(event) => {
                let is_submit = matches!(event, ChatEvent::Submit(_));
                if !self.view.handle(event) && is_submit {
                    writeln!(self.out, "(no conversation open, nothing sent)").context(
                        TerminalSnafu {
                            stage: "write-ignored-send",
                        },
                    )?;
                }
            }
        }

        let frame = self.view.render();
        write_frame(&mut self.out, &frame).context(TerminalSnafu {
            stage: "write-frame",
        })?;
        Ok(ShellFlow::Continue)
    }

    /// Prints the initial frame, then executes commands until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<(), ShellError> {
        self.execute(ShellCommand::Show)?;

        for line in input.lines() {
            let line = line.context(TerminalSnafu {
                stage: "read-command",
            })?;

            match ShellCommand::parse(&line) {
                Ok(Some(command)) => {
                    if self.execute(command)? == ShellFlow::Quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::debug!("rejected shell input: {error}");
                    writeln!(self.out, "error: {error}").context(TerminalSnafu {
                        stage: "write-command-error",
                    })?;
                }
            }

            write!(self.out, "{PROMPT}").context(TerminalSnafu {
                stage: "write-prompt",
            })?;
            self.out.flush().context(TerminalSnafu {
                stage: "flush-prompt",
            })?;
        }

        Ok(())
    }
}

/// Writes a plain-text rendition of `frame`.
pub fn write_frame(out: &mut impl Write, frame: &ChatFrame) -> io::Result<()> {
    if let Some(roster) = frame.roster.as_ref() {
        writeln!(out, "== {ROSTER_TITLE} ==")?;
        if frame.search_query.is_empty() {
            writeln!(out, "[{SEARCH_PLACEHOLDER}]")?;
        } else {
            writeln!(out, "[search: {}]", frame.search_query)?;
        }

        for entry in roster {
            let cursor = if entry.is_selected { '*' } else { ' ' };
            let badge = entry
                .unread_badge
                .map(|count| format!(" ({count})"))
                .unwrap_or_default();
            writeln!(
                out,
                "{cursor} [{}] {} <{}> {}{badge}",
                entry.contact_id,
                entry.name,
                entry.presence.label().to_lowercase(),
                entry.preview_time,
            )?;
            writeln!(out, "      {}", entry.preview)?;
        }
    }

    match frame.conversation.as_ref() {
        None => {}
        Some(TimelineView::Placeholder) => writeln!(out, "-- {PLACEHOLDER_PROMPT} --")?,
        Some(TimelineView::Active(conversation)) => {
            let header = &conversation.header;
            let back = if header.show_back { "< back | " } else { "" };
            writeln!(
                out,
                "-- {back}{} ({}) --",
                header.name,
                header.presence_label()
            )?;

            if conversation.is_empty() {
                writeln!(out, "   (no messages yet)")?;
            }
            for row in &conversation.rows {
                let receipt = match row.read_marker {
                    Some(ReadMarker::Read) => " [read]",
                    Some(ReadMarker::Sent) => " [sent]",
                    None => "",
                };
                let lead = match row.alignment {
                    Alignment::Start => "<<",
                    Alignment::End => "          >>",
                };
                writeln!(out, "{lead} {} ({}){receipt}", row.content, row.timestamp)?;
            }
        }
    }

    if frame.compose_enabled {
        writeln!(out, "[compose: send <text>]")?;
    }
    if let Some(scroll) = frame.scroll.as_ref() {
        tracing::trace!(contact = %scroll.contact_id, message = %scroll.message_id, "scroll to latest");
        writeln!(out, "(scrolled to latest)")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> ChatAppShell<Vec<u8>> {
        let view = view_from_seed(murmur_storage::demo(), &ViewSettings::default());
        ChatAppShell::new(view, Vec::new())
    }

    fn output(shell: ChatAppShell<Vec<u8>>) -> String {
        String::from_utf8(shell.into_output()).expect("utf-8 output")
    }

    #[test]
    fn parses_commands_and_keeps_send_text_verbatim() {
        assert_eq!(ShellCommand::parse("   ").ok(), Some(None));
        assert_eq!(
            ShellCommand::parse("send   two  spaces\n").ok().flatten(),
            Some(ShellCommand::Event(Submit::new("  two  spaces").into()))
        );
        assert_eq!(
            ShellCommand::parse("select 3").ok().flatten(),
            Some(ShellCommand::Event(ContactSelected::new("3").into()))
        );
        assert_eq!(
            ShellCommand::parse("narrow on").ok().flatten(),
            Some(ShellCommand::Event(LayoutChanged { narrow_mode: true }.into()))
        );
        assert_eq!(ShellCommand::parse("exit").ok().flatten(), Some(ShellCommand::Quit));
    }

    #[test]
    fn tab_separates_command_from_argument() {
        assert_eq!(
            ShellCommand::parse("send\thi\tthere").ok().flatten(),
            Some(ShellCommand::Event(Submit::new("hi\tthere").into()))
        );
        assert_eq!(
            ShellCommand::parse("select\t4").ok().flatten(),
            Some(ShellCommand::Event(ContactSelected::new("4").into()))
        );
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!(matches!(
            ShellCommand::parse("select"),
            Err(CommandError::MissingArgument { command: "select" })
        ));
        assert!(matches!(
            ShellCommand::parse("narrow maybe"),
            Err(CommandError::InvalidToggle { .. })
        ));
        assert!(matches!(
            ShellCommand::parse("dance"),
            Err(CommandError::UnknownCommand { .. })
        ));
    }

    #[test]
    fn run_renders_frames_until_quit() {
        let mut shell = shell();
        let input = "select 2\nsend hello there\nquit\nsend never\n";
        shell.run(input.as_bytes()).expect("shell runs");

        assert_eq!(shell.view().timeline_for(&"2".into()).len(), 4);
        let text = output(shell);
        assert!(text.contains(PLACEHOLDER_PROMPT));
        assert!(text.contains("-- John Doe (Offline) --"));
        assert!(text.contains(">> hello there"));
        assert!(text.contains("[sent]"));
        assert!(!text.contains("never"));
    }

    #[test]
    fn send_without_selection_is_reported_not_applied() {
        let mut shell = shell();
        shell.run("send hi\nbogus\n".as_bytes()).expect("shell runs");

        let total = shell.view().store_snapshot().total_messages();
        let text = output(shell);
        assert_eq!(total, 16);
        assert!(text.contains("nothing sent"));
        assert!(text.contains("error: unknown command 'bogus'"));
    }

    #[test]
    fn bootstrap_uses_demo_roster_without_seed_path() {
        let view = bootstrap(&ViewSettings::default()).expect("bootstrap");
        assert_eq!(view.directory().len(), 5);
        assert!(!view.narrow_mode());
    }

    #[test]
    fn bootstrap_surfaces_seed_errors() {
        let settings = ViewSettings {
            seed_path: Some("/definitely/not/here/seed.json".into()),
            ..ViewSettings::default()
        };
        assert!(matches!(
            bootstrap(&settings),
            Err(ShellError::LoadSeed { .. })
        ));
    }
}
