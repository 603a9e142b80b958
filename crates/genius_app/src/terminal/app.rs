use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use genius_core::{update, AppState, AppViewModel, Msg};
use genius_logging::{genius_debug, genius_info, genius_warn};

use super::render::{render, Frame};
use super::EffectRunner;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    Msg(Msg),
    /// Stop reading input; in-flight requests still settle.
    Quit,
}

pub struct App<W: Write> {
    state: AppState,
    effects: EffectRunner,
    events: mpsc::Receiver<ShellEvent>,
    out: W,
    last_frame: Frame,
}

impl<W: Write> App<W> {
    pub fn new(effects: EffectRunner, events: mpsc::Receiver<ShellEvent>, out: W) -> Self {
        Self {
            state: AppState::new(),
            effects,
            events,
            out,
            last_frame: Frame::default(),
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.effects.enqueue(effects);
        if was_dirty {
            self.present(&view)?;
        }
        Ok(())
    }

    /// Blocks on completions until nothing is in flight.
    pub fn settle(&mut self) -> io::Result<()> {
        while self.state.has_pending() {
            match self.events.recv() {
                Ok(ShellEvent::Msg(msg)) => self.dispatch(msg)?,
                Ok(ShellEvent::Quit) => {}
                Err(_) => break,
            }
        }
        Ok(())
    }

    fn present(&mut self, view: &AppViewModel) -> io::Result<()> {
        let frame = render(view);
        if frame.status != self.last_frame.status {
            genius_info!("{}", frame.status);
        }
        if frame.result != self.last_frame.result {
            if let Some(text) = &frame.result {
                writeln!(self.out, "{text}")?;
                self.out.flush()?;
            }
        }
        self.last_frame = frame;
        Ok(())
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.out
    }
}

/// Sets the input, triggers one action and waits for its result.
pub fn run_once<W: Write>(app: &mut App<W>, input: String, action: Msg) -> io::Result<()> {
    app.dispatch(Msg::InputChanged(input))?;
    app.dispatch(action)?;
    app.settle()
}

/// Reads commands from `reader` on a separate thread so results keep
/// arriving while the user types.
pub fn run_session<W, R>(app: &mut App<W>, reader: R, tx: mpsc::Sender<ShellEvent>) -> io::Result<()>
where
    W: Write,
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in reader.lines() {
            let event = match line {
                Ok(line) => parse_line(&line),
                Err(err) => {
                    genius_warn!("Failed to read input: {}", err);
                    ShellEvent::Quit
                }
            };
            let quit = event == ShellEvent::Quit;
            if tx.send(event).is_err() || quit {
                return;
            }
        }
        let _ = tx.send(ShellEvent::Quit);
    });

    loop {
        match app.events.recv() {
            Ok(ShellEvent::Msg(msg)) => app.dispatch(msg)?,
            Ok(ShellEvent::Quit) | Err(_) => break,
        }
    }
    genius_debug!("Session input closed; settling in-flight requests");
    app.settle()
}

fn parse_line(line: &str) -> ShellEvent {
    match line.trim() {
        ":submit" | ":s" => ShellEvent::Msg(Msg::SubmitClicked),
        ":generate" | ":g" => ShellEvent::Msg(Msg::GenerateClicked),
        ":quit" | ":q" => ShellEvent::Quit,
        command if command.starts_with(':') => {
            genius_warn!("Unknown command {}", command);
            ShellEvent::Msg(Msg::NoOp)
        }
        _ => ShellEvent::Msg(Msg::InputChanged(line.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use genius_core::{Phase, ResultPayload};
    use genius_engine::{FailureKind, InferenceClient, RequestId, SubmitError};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    /// Replies with a fixed result for every submission.
    struct FixedClient(Result<Option<String>, SubmitError>);

    #[async_trait::async_trait]
    impl InferenceClient for FixedClient {
        async fn submit(
            &self,
            _request_id: RequestId,
            _github_link: &str,
        ) -> Result<Option<String>, SubmitError> {
            self.0.clone()
        }
    }

    fn app_with(
        reply: Result<Option<String>, SubmitError>,
        dir: &TempDir,
    ) -> (App<Vec<u8>>, mpsc::Sender<ShellEvent>) {
        let (tx, rx) = mpsc::channel();
        let effects = EffectRunner::with_client(
            Arc::new(FixedClient(reply)),
            dir.path().to_path_buf(),
            tx.clone(),
        )
        .unwrap();
        (App::new(effects, rx, Vec::new()), tx)
    }

    fn output(app: App<Vec<u8>>) -> String {
        String::from_utf8(app.into_output()).unwrap()
    }

    #[test]
    fn submit_prints_report() {
        let dir = TempDir::new().unwrap();
        let (mut app, _tx) = app_with(Ok(Some("X".to_string())), &dir);

        run_once(&mut app, "https://github.com/user/repo".into(), Msg::SubmitClicked).unwrap();

        assert_eq!(app.view().phase, Phase::Displayed);
        assert_eq!(output(app), "X\n");
    }

    #[test]
    fn submit_without_report_prints_placeholder() {
        let dir = TempDir::new().unwrap();
        let (mut app, _tx) = app_with(Ok(None), &dir);

        run_once(&mut app, String::new(), Msg::SubmitClicked).unwrap();

        assert_eq!(output(app), "No response received\n");
    }

    #[test]
    fn http_failure_prints_prefixed_body() {
        let dir = TempDir::new().unwrap();
        let err = SubmitError {
            kind: FailureKind::HttpStatus(500),
            message: "internal failure".to_string(),
        };
        let (mut app, _tx) = app_with(Err(err), &dir);

        run_once(&mut app, "repo".into(), Msg::SubmitClicked).unwrap();

        assert!(app.view().failed());
        assert_eq!(output(app), "Error: internal failure\n");
    }

    #[test]
    fn whitespace_error_body_is_kept() {
        let dir = TempDir::new().unwrap();
        let err = SubmitError {
            kind: FailureKind::HttpStatus(503),
            message: "  \n".to_string(),
        };
        let (mut app, _tx) = app_with(Err(err), &dir);

        run_once(&mut app, "repo".into(), Msg::SubmitClicked).unwrap();

        assert_eq!(output(app), "Error:   \n\n");
    }

    #[test]
    fn report_starting_with_error_text_is_not_a_failure() {
        let dir = TempDir::new().unwrap();
        let (mut app, _tx) = app_with(Ok(Some("Error: none found".to_string())), &dir);

        run_once(&mut app, "repo".into(), Msg::SubmitClicked).unwrap();

        assert!(!app.view().failed());
        assert_eq!(output(app), "Error: none found\n");
    }

    #[test]
    fn empty_error_body_falls_back_to_kind() {
        let dir = TempDir::new().unwrap();
        let err = SubmitError {
            kind: FailureKind::HttpStatus(502),
            message: String::new(),
        };
        let (mut app, _tx) = app_with(Err(err), &dir);

        run_once(&mut app, "repo".into(), Msg::SubmitClicked).unwrap();

        assert_eq!(output(app), "Error: http status 502\n");
    }

    #[test]
    fn generate_writes_output_md() {
        let dir = TempDir::new().unwrap();
        let (mut app, _tx) = app_with(Ok(None), &dir);

        run_once(&mut app, "T".into(), Msg::GenerateClicked).unwrap();

        let path = dir.path().join("output.md");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# Codebase Genius\n\nT"
        );
        match app.view().result {
            Some(ResultPayload::Document(doc)) => assert_eq!(doc.location, Some(path)),
            other => panic!("expected document, got {other:?}"),
        }
    }

    #[test]
    fn session_runs_both_actions_on_one_input() {
        let dir = TempDir::new().unwrap();
        let (mut app, tx) = app_with(Ok(Some("report".to_string())), &dir);
        let input = Cursor::new("https://github.com/a/b\n:submit\n:generate\n:bogus\n:quit\nignored\n");

        run_session(&mut app, input, tx).unwrap();

        let view = app.view();
        assert_eq!(view.input, "https://github.com/a/b");
        assert_eq!(view.pending_requests, 0);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("output.md")).unwrap(),
            "# Codebase Genius\n\nhttps://github.com/a/b"
        );
        let printed = output(app);
        assert!(printed.contains("report\n"));
        assert!(printed.contains("Saved output.md"));
    }

    #[test]
    fn parse_line_maps_commands() {
        assert_eq!(parse_line(" :s "), ShellEvent::Msg(Msg::SubmitClicked));
        assert_eq!(parse_line(":generate"), ShellEvent::Msg(Msg::GenerateClicked));
        assert_eq!(parse_line(":q"), ShellEvent::Quit);
        assert_eq!(parse_line(":nope"), ShellEvent::Msg(Msg::NoOp));
        assert_eq!(
            parse_line("  text with spaces "),
            ShellEvent::Msg(Msg::InputChanged("  text with spaces ".to_string()))
        );
        assert_eq!(parse_line(""), ShellEvent::Msg(Msg::InputChanged(String::new())));
    }
}
