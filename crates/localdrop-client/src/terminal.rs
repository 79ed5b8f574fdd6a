//! Line-oriented terminal front-end.
//!
//! A reader thread turns input lines into [`AppEvent`]s. Lines a command's
//! dialogs ask for are taken from the same stream, in order, so typed-ahead
//! or piped answers land where they belong.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use std::thread;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use localdrop_shared::error::{ClipboardError, DownloadError};

use crate::events::{AppEvent, UiEvent};
use crate::files::PendingUpload;
use crate::host::Host;
use crate::render::{DisplayRow, FileBody, Pane, RowAction, View};

pub const HELP: &str = "\
commands:
  upload <path>      upload a file (max 5 MB)
  search <keyword>   filter files as you type
  find [keyword]     submit the search
  say <message>      send a chat message
  name <name>        save your profile name
  invite             copy an invite link
  copy <row>         copy a file's text content
  menu <row>         download / delete a file
  files | chat       redraw a pane
  help | quit";

/// Parse one input line. `Ok(None)` means "nothing to do".
pub fn parse_line(line: &str) -> Result<Option<AppEvent>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let event = match command {
        "upload" => {
            if rest.is_empty() {
                return Err("usage: upload <path>".into());
            }
            let pending = PendingUpload::from_path(Path::new(rest))
                .map_err(|e| format!("cannot open {rest}: {e}"))?;
            UiEvent::SubmitFile(pending)
        }
        "search" => UiEvent::SearchInput(rest.to_string()),
        "find" if rest.is_empty() => UiEvent::SearchSubmit,
        "find" => return Ok(Some(UiEvent::SearchInput(rest.to_string()).into())),
        "say" => UiEvent::SendChat(rest.to_string()),
        "name" => UiEvent::SaveProfileName(rest.to_string()),
        "invite" => UiEvent::CreateInvite,
        "copy" => UiEvent::CopyContent { row: parse_row(rest)? },
        "menu" => UiEvent::SecondaryActivate { row: parse_row(rest)? },
        "files" => UiEvent::Redraw(Pane::Files),
        "chat" => UiEvent::Redraw(Pane::Chat),
        "quit" | "exit" => return Ok(Some(AppEvent::Shutdown)),
        "help" => return Err(HELP.to_string()),
        other => return Err(format!("unknown command `{other}` (try `help`)")),
    };

    Ok(Some(event.into()))
}

fn parse_row(arg: &str) -> Result<usize, String> {
    arg.parse::<usize>()
        .map_err(|_| format!("expected a row number, got `{arg}`"))
}

/// Requests from the loop side to the reader thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    /// A dialog wants the next input line as its answer.
    ReadLine,
    /// The last command has run to completion.
    Done,
}

/// Reader-side half of the connection made by [`TerminalHost::new`].
pub struct InputLink {
    turns: std_mpsc::Receiver<Turn>,
    answers: std_mpsc::Sender<String>,
    command_pending: Arc<AtomicBool>,
}

/// Start the input reader. End of input sends [`AppEvent::Shutdown`].
///
/// Input is consumed strictly in order: after forwarding a command the reader
/// reads nothing else until the loop reports it finished, handing lines to
/// any dialog the command opens along the way.
pub fn spawn_reader<R>(
    input: R,
    events: UnboundedSender<AppEvent>,
    link: InputLink,
) -> thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        read_commands(input, &events, &link);
        debug!("input closed");
        let _ = events.send(AppEvent::Shutdown);
    })
}

fn read_commands<R: BufRead>(input: R, events: &UnboundedSender<AppEvent>, link: &InputLink) {
    let mut lines = input.lines();

    while let Some(line) = next_line(&mut lines) {
        let event = match parse_line(&line) {
            Ok(Some(AppEvent::Shutdown)) => return,
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        link.command_pending.store(true, Ordering::SeqCst);
        if events.send(event).is_err() {
            return;
        }

        loop {
            match link.turns.recv() {
                Ok(Turn::ReadLine) => {
                    let Some(answer) = next_line(&mut lines) else {
                        return;
                    };
                    if link.answers.send(answer).is_err() {
                        return;
                    }
                }
                Ok(Turn::Done) => break,
                Err(_) => return,
            }
        }
    }
}

fn next_line<R: BufRead>(lines: &mut io::Lines<R>) -> Option<String> {
    match lines.next()? {
        Ok(line) => Some(line),
        Err(e) => {
            warn!(error = %e, "input read failed");
            None
        }
    }
}

/// [`Host`] that draws to stdout and asks questions through the reader.
pub struct TerminalHost {
    download_dir: PathBuf,
    turns: std_mpsc::Sender<Turn>,
    answers: std_mpsc::Receiver<String>,
    command_pending: Arc<AtomicBool>,
    clipboard: Option<arboard::Clipboard>,
}

impl TerminalHost {
    /// Build the host and the link its input reader must be started with.
    pub fn new(download_dir: PathBuf) -> (Self, InputLink) {
        let (turn_tx, turn_rx) = std_mpsc::channel();
        let (answer_tx, answer_rx) = std_mpsc::channel();
        let command_pending = Arc::new(AtomicBool::new(false));

        let host = Self {
            download_dir,
            turns: turn_tx,
            answers: answer_rx,
            command_pending: command_pending.clone(),
            clipboard: None,
        };
        let link = InputLink {
            turns: turn_rx,
            answers: answer_tx,
            command_pending,
        };
        (host, link)
    }

    /// `None` once input has ended.
    fn ask(&mut self, question: &str) -> Option<String> {
        print!("{question}\n> ");
        let _ = io::stdout().flush();
        self.turns.send(Turn::ReadLine).ok()?;
        self.answers.recv().ok()
    }

    fn clipboard(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.clipboard.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;
            self.clipboard = Some(clipboard);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| ClipboardError::WriteFailed("clipboard unavailable".into()))
    }
}

impl Host for TerminalHost {
    fn present(&mut self, view: &View) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{}", format_view(view));
        let _ = out.flush();
    }

    fn alert(&mut self, message: &str) {
        println!("! {message}");
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.ask(&format!("{message} [y/N]"))
            .is_some_and(|answer| matches!(answer.trim(), "y" | "Y" | "yes"))
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        self.ask(message)
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.clipboard()?
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }

    fn download(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, DownloadError> {
        std::fs::create_dir_all(&self.download_dir)?;
        let target = self.download_dir.join(safe_file_name(file_name));
        std::fs::write(&target, bytes)?;
        Ok(target)
    }

    fn show_profile_name(&mut self, name: &str) {
        if name.is_empty() {
            println!("profile: (unnamed) - set one with `name <name>`");
        } else {
            println!("profile: {name}");
        }
    }

    fn action_finished(&mut self) {
        // Only commands forwarded by the reader are waited on.
        if self.command_pending.swap(false, Ordering::SeqCst) {
            let _ = self.turns.send(Turn::Done);
        }
    }
}

/// Strip any directory components so downloads stay in the download dir.
fn safe_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "." || base == ".." {
        "download".to_string()
    } else {
        base.to_string()
    }
}

/// Plain-text rendering of a view.
pub fn format_view(view: &View) -> String {
    let mut out = String::new();
    match view.pane {
        Pane::Files => out.push_str("── files ──"),
        Pane::Chat => out.push_str("── chat ──"),
    }

    if view.rows.is_empty() {
        out.push_str("\n  (empty)");
    }

    for (position, row) in view.rows.iter().enumerate() {
        match row {
            DisplayRow::File(file) => {
                out.push_str(&format!("\n[{position}] {}", file.title));
                match &file.body {
                    FileBody::Text { content } => {
                        for line in content.lines() {
                            out.push_str("\n    ");
                            out.push_str(line);
                        }
                    }
                    FileBody::Image { data_uri } => {
                        out.push_str(&format!("\n    <image, {} chars of data>", data_uri.len()));
                    }
                }
                let mut hints: Vec<&str> = file
                    .actions
                    .iter()
                    .map(|action| match action {
                        RowAction::CopyContent => "copy",
                        RowAction::Download | RowAction::Delete => "menu",
                    })
                    .collect();
                hints.dedup();
                out.push_str(&format!("\n    ({})", hints.join(", ")));
            }
            DisplayRow::Chat(line) => {
                out.push('\n');
                out.push_str(&line.text);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::app::App;
    use crate::config::ClientConfig;
    use crate::render::{ChatLine, FileRow};
    use crate::state::AppState;
    use localdrop_shared::FileRecord;
    use localdrop_store::MemoryStore;

    /// Run the loop against scripted input, starting with one text file.
    async fn run_script(script: &'static str) -> App<MemoryStore, TerminalHost> {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::load(MemoryStore::new(), &ClientConfig::default());
        let record = FileRecord {
            name: "a.txt".into(),
            size_bytes: 1,
            mime_type: "text/plain".into(),
            last_modified_ms: 0,
            content: "a".into(),
        };
        state.files.append(&mut state.store, record).unwrap();

        let (host, link) = TerminalHost::new(dir.path().to_path_buf());
        let app = App::new(state, host, "http://h/");
        let reader = spawn_reader(Cursor::new(script), app.sender(), link);

        let app = app.run().await;
        reader.join().unwrap();
        app
    }

    #[test]
    fn parses_simple_commands() {
        assert!(matches!(
            parse_line("say  hello world "),
            Ok(Some(AppEvent::Ui(UiEvent::SendChat(body)))) if body == "hello world"
        ));
        assert!(matches!(
            parse_line("menu 2"),
            Ok(Some(AppEvent::Ui(UiEvent::SecondaryActivate { row: 2 })))
        ));
        assert!(matches!(
            parse_line("find"),
            Ok(Some(AppEvent::Ui(UiEvent::SearchSubmit)))
        ));
        assert!(matches!(parse_line("quit"), Ok(Some(AppEvent::Shutdown))));
        assert!(matches!(parse_line("   "), Ok(None)));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_line("copy x").is_err());
        assert!(parse_line("upload").is_err());
        assert!(parse_line("upload /no/such/file").is_err());
        assert!(parse_line("dance").is_err());
    }

    #[test]
    fn upload_reads_metadata_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.gif");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        match parse_line(&format!("upload {}", path.display())) {
            Ok(Some(AppEvent::Ui(UiEvent::SubmitFile(pending)))) => {
                assert_eq!(pending.name, "pic.gif");
                assert_eq!(pending.mime_type, "image/gif");
                assert_eq!(pending.size_bytes, 3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn confirmation_takes_the_line_after_its_command() {
        let app = run_script("menu 0\ny\nfiles\nquit\n").await;
        assert!(app.state().files.is_empty());
    }

    #[tokio::test]
    async fn declined_confirmation_keeps_the_file() {
        let app = run_script("menu 0\nn\ny\nquit\n").await;
        assert_eq!(app.state().files.len(), 1);
    }

    #[tokio::test]
    async fn input_ending_inside_a_dialog_declines_it() {
        let app = run_script("menu 0\n").await;
        assert_eq!(app.state().files.len(), 1);
    }

    #[test]
    fn file_names_cannot_escape_download_dir() {
        assert_eq!(safe_file_name("../../etc/passwd"), "passwd");
        assert_eq!(safe_file_name("C:\\temp\\cat.png"), "cat.png");
        assert_eq!(safe_file_name(".."), "download");
        assert_eq!(safe_file_name(""), "download");
    }

    #[test]
    fn formats_views() {
        let files = View {
            pane: Pane::Files,
            rows: vec![DisplayRow::File(FileRow {
                index: 0,
                title: "a.txt (2 Bytes)".into(),
                body: FileBody::Text {
                    content: "hi".into(),
                },
                actions: vec![RowAction::CopyContent, RowAction::Delete],
            })],
            scroll_to: None,
        };
        assert_eq!(
            format_view(&files),
            "── files ──\n[0] a.txt (2 Bytes)\n    hi\n    (copy, menu)"
        );

        let chat = View {
            pane: Pane::Chat,
            rows: vec![DisplayRow::Chat(ChatLine {
                text: "[t] Nova: hi".into(),
            })],
            scroll_to: Some(0),
        };
        assert_eq!(format_view(&chat), "── chat ──\n[t] Nova: hi");
    }
}
