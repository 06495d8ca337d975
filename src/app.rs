//! Terminal front end
//!
//! Reads one command per line, forwards it to the session as a [`Msg`] and
//! prints the reply. Confirmations are asked inline as y/N questions.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use anyhow::{Context, bail};

use crate::config::{AppConfig, ShapeColor};
use crate::domain::{AnnotationMode, CoordField};
use crate::export;
use crate::session::handlers::update;
use crate::session::{Msg, RenderStep, Reply, Session};

const HELP: &str = "\
Commands:
  open <path>            load an image
  x1|y1|x2|y2 <value>    set one coordinate
  bbox <x1 y1 x2 y2>     set all four (spaces, commas or semicolons)
  mode <box|point|both>  annotation type
  color <#rrggbb>        stroke and fill color
  render                 draw the annotation
  save [dir]             write the annotated PNG
  status                 show image and coordinates
  remember               keep the current mode and color as defaults
  clear                  start over
  help                   this text
  quit                   exit";

/// One parsed input line
#[derive(Debug)]
enum Command {
    Open(PathBuf),
    Send(Msg),
    Render,
    Save(Option<PathBuf>),
    Status,
    Remember,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        if let Ok(field) = word.parse::<CoordField>() {
            return Ok(Command::Send(Msg::edit_field(field, rest)));
        }

        Ok(match word.to_ascii_lowercase().as_str() {
            "open" | "upload" => {
                if rest.is_empty() {
                    bail!("usage: open <path>");
                }
                Command::Open(PathBuf::from(rest))
            }
            "bbox" => Command::Send(Msg::edit_bbox_text(rest)),
            "mode" => Command::Send(Msg::SetMode(rest.parse::<AnnotationMode>()?)),
            "color" | "colour" => Command::Send(Msg::SetColor(rest.parse::<ShapeColor>()?)),
            "render" => Command::Render,
            "save" | "download" => Command::Save((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "clear" => Command::Send(Msg::Clear),
            "status" => Command::Status,
            "remember" => Command::Remember,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command {:?}, type help", other),
        })
    }
}

/// Line-oriented stand-in for the form
pub struct Frontend<R, W> {
    input: R,
    output: W,
    config: AppConfig,
    /// Where `remember` writes the config; `None` disables it
    config_path: Option<PathBuf>,
    session: Session,
}

impl<R: BufRead, W: Write> Frontend<R, W> {
    pub fn new(input: R, output: W, config: AppConfig, config_path: Option<PathBuf>) -> Self {
        let session = Session::new(&config);
        Self {
            input,
            output,
            config,
            config_path,
            session,
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Process commands until `quit` or end of input
    pub fn run(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "{}", HELP)?;
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => command,
                Err(err) => {
                    writeln!(self.output, "{}", err)?;
                    continue;
                }
            };
            if let Err(err) = self.execute(command) {
                log::debug!("Command failed: {:?}", err);
                writeln!(self.output, "error: {:#}", err)?;
            }
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Open(path) => {
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                self.send(Msg::Upload(bytes))
            }
            Command::Send(msg) => self.send(msg),
            Command::Render => self.render(),
            Command::Save(dir) => {
                let dir = dir.unwrap_or_else(|| export::save_dir(self.config.save_location));
                self.send(Msg::DownloadRequest(dir))
            }
            Command::Status => self.status(),
            Command::Remember => self.remember(),
            Command::Help => Ok(writeln!(self.output, "{}", HELP)?),
            Command::Quit => Ok(()),
        }
    }

    fn send(&mut self, msg: Msg) -> anyhow::Result<()> {
        match update(&mut self.session, msg)? {
            Reply::Loaded { width, height } => writeln!(
                self.output,
                "Image loaded: {} x {} pixels\n\
                 Keep coordinates within x in [0, {}], y in [0, {}]",
                width, height, width, height
            )?,
            Reply::Preview(Some(preview)) => writeln!(self.output, "{}", preview)?,
            Reply::Preview(None) => {}
            Reply::Render(step) => writeln!(self.output, "{:?}", step)?,
            Reply::Rendered(bbox) => writeln!(
                self.output,
                "Rendered box ({}, {}) to ({}, {})",
                bbox.x1, bbox.y1, bbox.x2, bbox.y2
            )?,
            Reply::Saved(path) => writeln!(self.output, "Saved {}", path.display())?,
            Reply::Updated => writeln!(
                self.output,
                "mode {}, color {}",
                self.session.mode, self.session.color
            )?,
            Reply::Cleared => writeln!(self.output, "Cleared")?,
        }
        Ok(())
    }

    /// Ask y/N; end of input counts as no
    fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        writeln!(self.output, "{}", question)?;
        write!(self.output, "Continue? [y/N] ")?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let mut step = self.session.request_render()?;
        loop {
            match step {
                RenderStep::Confirm(warning) => {
                    let accept = self.confirm(&warning.to_string())?;
                    step = self.session.acknowledge(accept)?;
                }
                RenderStep::Cancelled => {
                    writeln!(self.output, "Render cancelled")?;
                    return Ok(());
                }
                RenderStep::Ready => break,
            }
        }

        writeln!(self.output, "Rendering...")?;
        self.output.flush()?;
        thread::sleep(Duration::from_millis(self.config.render_delay_ms));
        self.send(Msg::FinishRender)
    }

    fn status(&mut self) -> anyhow::Result<()> {
        match &self.session.image {
            Some(image) => {
                let (w, h) = image.dimensions();
                writeln!(self.output, "Image: {} x {} {:?}", w, h, image.format)?
            }
            None => writeln!(self.output, "No image loaded")?,
        }
        writeln!(
            self.output,
            "mode {}, color {}",
            self.session.mode, self.session.color
        )?;
        if let Some(preview) = self.session.preview() {
            writeln!(self.output, "{}", preview)?;
        }
        if let Some(result) = &self.session.result {
            let b = result.bbox;
            writeln!(
                self.output,
                "Last render: ({}, {}) to ({}, {})",
                b.x1, b.y1, b.x2, b.y2
            )?;
        }
        Ok(())
    }

    /// Store the session's mode and color as the startup defaults
    fn remember(&mut self) -> anyhow::Result<()> {
        self.config.default_mode = self.session.mode;
        self.config.default_color = self.session.color;
        let Some(path) = &self.config_path else {
            bail!("no config directory, defaults not saved");
        };
        self.config.save_to(path)?;
        log::info!("Saved defaults to {:?}", path);
        writeln!(
            self.output,
            "Defaults saved: mode {}, color {}",
            self.config.default_mode, self.config.default_color
        )?;
        Ok(())
    }
}

/// Run the front end on stdin/stdout with the saved configuration
pub fn run() -> anyhow::Result<()> {
    let config = AppConfig::load();
    let stdin = io::stdin();
    let mut frontend = Frontend::new(stdin.lock(), io::stdout(), config, AppConfig::path());
    frontend.run()
}
