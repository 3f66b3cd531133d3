// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde_json::{json, Value};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use assedit::app_config::{EditorConfig, LogLevel};
use assedit::ass::{parse_blocks, Block, Style};
use assedit::editor::{FormatFlag, TagEdit, TaggedText, TextSelection};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for FormatFlag to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliFormatFlag {
    Bold,
    Italic,
    Underline,
    Strikeout,
}

impl From<CliFormatFlag> for FormatFlag {
    fn from(cli_flag: CliFormatFlag) -> Self {
        match cli_flag {
            CliFormatFlag::Bold => FormatFlag::Bold,
            CliFormatFlag::Italic => FormatFlag::Italic,
            CliFormatFlag::Underline => FormatFlag::Underline,
            CliFormatFlag::Strikeout => FormatFlag::Strikeout,
        }
    }
}

/// Line text and the selection inside it
#[derive(Args, Debug)]
struct TextArgs {
    /// Line text, override blocks included
    #[arg(short, long)]
    text: String,

    /// Selection start, in characters
    #[arg(short, long, default_value_t = 0)]
    start: usize,

    /// Selection end, in characters (defaults to the start)
    #[arg(short, long)]
    end: Option<usize>,
}

impl TextArgs {
    fn selection(&self) -> TextSelection {
        let len = self.text.chars().count();
        TextSelection::new(self.start, self.end.unwrap_or(self.start)).clamped(len)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Insert or replace an override tag at the selection
    SetTag {
        #[command(flatten)]
        text: TextArgs,

        /// Tag name including the backslash, e.g. '\fn'
        #[arg(long)]
        tag: String,

        /// Tag value, e.g. 'Arial'
        #[arg(long, allow_hyphen_values = true)]
        value: String,

        /// Write at the selection end instead of its start
        #[arg(long)]
        at_end: bool,
    },

    /// Toggle bold, italic, underline or strikeout over the selection
    Toggle {
        #[command(flatten)]
        text: TextArgs,

        /// Attribute to toggle
        #[arg(short, long, value_enum)]
        flag: CliFormatFlag,

        /// Style JSON file supplying the defaults
        #[arg(long, value_name = "STYLE_JSON")]
        style: Option<PathBuf>,
    },

    /// Print the parsed blocks of a line
    Blocks {
        /// Line text, override blocks included
        #[arg(short, long)]
        text: String,
    },

    /// Generate shell completions for assedit
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// assedit - override tag editing for ASS subtitle lines
#[derive(Parser, Debug)]
#[command(name = "assedit")]
#[command(version)]
#[command(about = "Edit ASS override tags from the command line")]
#[command(long_about = "assedit applies the subtitle edit panel's tag operations to a line of text
and prints the result as JSON.

EXAMPLES:
    assedit set-tag -t 'Hello {\\b1}world' --tag '\\fn' --value Arial
    assedit toggle -t 'Hello world' -s 6 -e 11 -f bold
    assedit blocks -t '{\\b1}Hello{comment} world'
    assedit completions bash > assedit.bash

CONFIGURATION:
    Configuration is read from assedit.json (or the user config directory).
    If the config file doesn't exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The max level is adjusted once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "assedit", &mut std::io::stdout());
        return Ok(());
    }

    let config_path = cli.config_path.clone().unwrap_or_else(EditorConfig::default_path);
    let mut config = EditorConfig::load_or_create(&config_path)?;
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Loaded configuration from '{}'", config_path.display());

    let output = run(cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run(command: Commands) -> Result<Value> {
    match command {
        Commands::SetTag { text, tag, value, at_end } => {
            let selection = text.selection();
            let mut tagged = TaggedText::new(&text.text);
            let edit = tagged.set_tag(&tag, &value, selection, at_end);
            Ok(edit_output(tagged, &edit))
        }
        Commands::Toggle { text, flag, style } => {
            let style = match style {
                Some(path) => load_style(&path)?,
                None => Style::default(),
            };
            let selection = text.selection();
            let mut tagged = TaggedText::new(&text.text);
            let edit = tagged.toggle_flag(flag.into(), &style, selection);
            Ok(edit_output(tagged, &edit))
        }
        Commands::Blocks { text } => Ok(Value::Array(parse_blocks(&text).iter().map(block_output).collect())),
        Commands::Completions { .. } => Ok(Value::Null),
    }
}

fn load_style(path: &Path) -> Result<Style> {
    let file = File::open(path).context(format!("Failed to open style file: {}", path.display()))?;
    let style: Style = serde_json::from_reader(BufReader::new(file))
        .context(format!("Failed to parse style file: {}", path.display()))?;
    Ok(style)
}

fn edit_output(tagged: TaggedText, edit: &TagEdit) -> Value {
    json!({
        "text": tagged.into_text(),
        "selection": edit.selection,
        "shift": edit.shift,
        "new_group": edit.new_group,
    })
}

fn block_output(block: &Block) -> Value {
    match block {
        Block::Plain(text) => json!({ "kind": "plain", "text": text, "comment": block.is_comment() }),
        Block::Drawing { text, scale } => json!({ "kind": "drawing", "text": text, "scale": scale }),
        Block::Override(tags) => json!({
            "kind": "override",
            "tags": tags
                .iter()
                .map(|tag| json!({
                    "name": tag.name,
                    "valid": tag.valid,
                    "params": tag.params.iter().map(|p| p.raw.clone()).collect::<Vec<_>>(),
                }))
                .collect::<Vec<_>>(),
        }),
    }
}
