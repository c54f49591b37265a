// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::{BufRead, stdin},
          path::PathBuf};

use clap::{CommandFactory, Parser, ValueEnum};
use miette::IntoDiagnostic;
use r3bl_widgets::*;
use StdinIsPipedResult::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Pick one line.
    Scroll,
    /// Mark one line with Space, confirm with Enter.
    Radio,
    /// Mark any number of lines with Space, confirm with Enter.
    Selection,
    /// Page through the lines, then pick OK or Cancel.
    Viewer,
}

#[derive(Debug, Parser)]
#[command(bin_name = "rw")]
#[command(about = "Pick from lines piped in via stdin using an interactive terminal widget", long_about = None)]
#[command(version)]
#[command(next_line_help = true)]
struct CliArgs {
    /// Which widget to show 👉
    #[arg(value_name = "mode", long, short = 'm', default_value = "scroll")]
    mode: Mode,

    /// Optional maximum height of the widget (in rows)
    #[arg(value_name = "height", long, short = 't')]
    height: Option<u16>,

    /// Optional title shown above the items
    #[arg(value_name = "title", long)]
    title: Option<String>,

    /// Replay these keys instead of reading the keyboard, eg: "down,down,enter" 💡
    #[arg(value_name = "keys", long, short = 'k')]
    keys: Option<String>,

    /// JSON file with key bindings, eg: {"remap": {"j": "down"}, "cancel": ["q"]}
    #[arg(value_name = "file", long, short = 'b')]
    bindings: Option<PathBuf>,

    /// Log to log.txt in the current folder
    #[arg(long, short = 'l')]
    enable_logging: bool,
}

const DEFAULT_HEIGHT_ROWS: u16 = 8;
const VIEWER_BUTTONS: [&str; 2] = ["OK", "Cancel"];

fn main() -> miette::Result<()> {
    let cli_args = CliArgs::parse();

    if cli_args.enable_logging {
        try_initialize_logging_global(&TracingConfig::new_file(None))?;
        tracing::debug!(message = "Start logging...", ?cli_args);
    }

    if let StdinIsNotPiped = is_stdin_piped() {
        let cmd = CliArgs::command();
        let bin_name = cmd.get_bin_name().unwrap_or("this command");
        println!(
            "Please pipe the output of another command into {bin_name}. \
             \n✅ For example: `ls -1 | {bin_name} --mode radio`"
        );
        return Ok(());
    }

    let lines: Vec<String> = stdin().lock().lines().map_while(Result::ok).collect();
    // Nothing to pick from.
    if lines.is_empty() {
        return Ok(());
    }

    let keys = cli_args
        .keys
        .as_deref()
        .map(parse_key_sequence)
        .transpose()?;
    let bindings = cli_args
        .bindings
        .as_ref()
        .map(KeyBindingsConfig::try_load_from_file)
        .transpose()?;

    let runner = Runner {
        keys: keys.as_deref(),
        bindings: bindings.as_ref(),
        screen: get_size_or_default(),
    };
    // The viewer needs two more rows for its buttons.
    let content_rows = match cli_args.mode {
        Mode::Viewer => lines.len() + 2,
        _ => lines.len(),
    };
    let region = runner.region(cli_args.height, content_rows, cli_args.title.as_deref());
    let options = ListOptions {
        title: cli_args.title.clone(),
        boxed: true,
        numbered: false,
        scrollbar: true,
    };

    let picked: Vec<String> = match cli_args.mode {
        Mode::Scroll => {
            let widget = ScrollList::try_new(region, runner.screen, lines.clone(), &options)?;
            runner
                .run(widget)?
                .and_then(|it| lines.get(it).cloned())
                .into_iter()
                .collect()
        }
        Mode::Radio => {
            let widget = RadioList::try_new(region, runner.screen, lines.clone(), 0, &options)?;
            runner
                .run(widget)?
                .and_then(|it| lines.get(it).cloned())
                .into_iter()
                .collect()
        }
        Mode::Selection => {
            let widget =
                SelectionList::try_new(region, runner.screen, lines.clone(), vec![], &options)?;
            runner
                .run(widget)?
                .unwrap_or_default()
                .into_iter()
                .zip(&lines)
                .filter(|(choice, _)| *choice != 0)
                .map(|(_, line)| line.clone())
                .collect()
        }
        Mode::Viewer => {
            let buttons = VIEWER_BUTTONS.iter().map(ToString::to_string).collect();
            let widget = Viewer::try_new(region, runner.screen, lines, buttons, &options)?;
            runner
                .run(widget)?
                .and_then(|it| VIEWER_BUTTONS.get(it))
                .map(ToString::to_string)
                .into_iter()
                .collect()
        }
    };

    tracing::debug!(message = "Stop logging...", ?picked);

    for it in picked {
        println!("{it}");
    }

    Ok(())
}

/// How a widget is driven: scripted keys on an off screen surface, or the terminal.
#[derive(Debug)]
struct Runner<'a> {
    keys: Option<&'a [KeyPress]>,
    bindings: Option<&'a KeyBindingsConfig>,
    screen: Size,
}

impl Runner<'_> {
    /// The widget sits at the top of the screen. Unless `height` says otherwise it is as
    /// tall as its content, the border and the title need, up to a default limit.
    fn region(&self, height: Option<u16>, content_rows: usize, title: Option<&str>) -> Region {
        let title_rows = title.map_or(0, |it| it.lines().count());
        let frame_rows = u16::try_from(title_rows + 2).unwrap_or(u16::MAX);
        let wanted = u16::try_from(content_rows)
            .unwrap_or(u16::MAX)
            .saturating_add(frame_rows);
        let rows = height
            .unwrap_or_else(|| wanted.min(DEFAULT_HEIGHT_ROWS.saturating_add(frame_rows)))
            .min(self.screen.rows);
        Region::new(0, 0, rows, self.screen.cols)
    }

    fn run<E: WidgetEngine>(&self, mut widget: Widget<E>) -> miette::Result<Option<E::Payload>> {
        if let Some(config) = self.bindings {
            let kind = widget.engine().kind();
            let _ = config.apply_to(kind, widget.bindings_mut())?;
        }

        match self.keys {
            Some(keys) => {
                let mut surface = TestSurface::new(self.screen);
                let mut reader = TestVecKeyPressReader::default();
                Ok(activate(&mut widget, Some(keys), &mut reader, &mut surface))
            }
            None => activate_in_terminal(&mut widget, None).into_diagnostic(),
        }
    }
}
