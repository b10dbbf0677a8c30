//! Source line classification and directive parsing.
//!
//! A source line is one of:
//! - blank, skipped
//! - a directive: `#> name args...`
//! - stripped content: `##` followed by text, written without the marker
//! - plain content, written verbatim
//!
//! A marker line whose name is not a known directive is plain content, so
//! scripts can still emit literal text starting with `#> `.

mod tokenize;

use thiserror::Error;

use crate::consts::{DIRECTIVE_MARKER, STRIP_MARKER};

pub use tokenize::tokenize;

/// A parsed control instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
  /// `root` - go to the root reference
  Root,
  /// `home` - go to the home reference
  Home,
  /// `sethome [path]` - point home at `path`, or at the current location
  SetHome { path: Option<String> },
  /// `init namespace [pack_format] [description]` - build the datapack skeleton
  Init {
    namespace: String,
    pack_format: Option<String>,
    description: Option<String>,
  },
  /// `cd path`
  Cd { path: String },
  /// `mkdir path`
  Mkdir { path: String },
  /// `rmdir path` - delete a directory and everything below it
  Rmdir { path: String },
  /// `clear [path]` - empty a directory, keeping it
  Clear { path: Option<String> },
  /// `open path` - push an output file
  Open { path: String },
  /// `close` - pop the current output file
  Close,
  /// `del path` - delete a file
  Del { path: String },
  /// `log message` - always-visible message, the rest of the line verbatim
  Log { message: String },
}

impl Directive {
  pub fn name(&self) -> &'static str {
    match self {
      Directive::Root => "root",
      Directive::Home => "home",
      Directive::SetHome { .. } => "sethome",
      Directive::Init { .. } => "init",
      Directive::Cd { .. } => "cd",
      Directive::Mkdir { .. } => "mkdir",
      Directive::Rmdir { .. } => "rmdir",
      Directive::Clear { .. } => "clear",
      Directive::Open { .. } => "open",
      Directive::Close => "close",
      Directive::Del { .. } => "del",
      Directive::Log { .. } => "log",
    }
  }

  /// Parse a directive from its name and the text following it.
  ///
  /// `Ok(None)` means `name` is not a directive at all.
  pub fn parse(name: &str, rest: &str) -> Result<Option<Directive>, DirectiveError> {
    let mut args = tokenize(rest).into_iter();

    let directive = match name {
      "root" => Directive::Root,
      "home" => Directive::Home,
      "sethome" => Directive::SetHome { path: args.next() },
      "init" => Directive::Init {
        namespace: required(args.next(), "init", "namespace")?,
        pack_format: args.next(),
        description: args.next(),
      },
      "cd" => Directive::Cd {
        path: required(args.next(), "cd", "path")?,
      },
      "mkdir" => Directive::Mkdir {
        path: required(args.next(), "mkdir", "path")?,
      },
      "rmdir" => Directive::Rmdir {
        path: required(args.next(), "rmdir", "path")?,
      },
      "clear" => Directive::Clear { path: args.next() },
      "open" => Directive::Open {
        path: required(args.next(), "open", "path")?,
      },
      "close" => Directive::Close,
      "del" => Directive::Del {
        path: required(args.next(), "del", "path")?,
      },
      "log" => {
        let message = rest.trim();
        if message.is_empty() {
          return Err(DirectiveError::MissingArgument {
            directive: "log",
            argument: "message",
          });
        }
        Directive::Log {
          message: message.to_string(),
        }
      }
      _ => return Ok(None),
    };

    Ok(Some(directive))
  }
}

fn required(arg: Option<String>, directive: &'static str, argument: &'static str) -> Result<String, DirectiveError> {
  arg.ok_or(DirectiveError::MissingArgument { directive, argument })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
  #[error("directive '{directive}' is missing required argument <{argument}>")]
  MissingArgument {
    directive: &'static str,
    argument: &'static str,
  },
}

/// What a single source line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
  /// Whitespace only, or a directive marker with nothing after it.
  Blank,
  Directive(Directive),
  /// A known directive with unusable arguments.
  Malformed(DirectiveError),
  /// Text for the current output file.
  Content(&'a str),
}

/// Classify one source line.
pub fn classify(line: &str) -> Line<'_> {
  if line.trim().is_empty() {
    return Line::Blank;
  }

  if let Some(body) = line.strip_prefix(DIRECTIVE_MARKER) {
    let body = body.trim_start();
    if body.is_empty() {
      return Line::Blank;
    }
    let (name, rest) = body.split_once(char::is_whitespace).unwrap_or((body, ""));
    return match Directive::parse(name, rest) {
      Ok(Some(directive)) => Line::Directive(directive),
      Ok(None) => Line::Content(line),
      Err(e) => Line::Malformed(e),
    };
  }

  if let Some(content) = line.strip_prefix(STRIP_MARKER) {
    return Line::Content(content.trim_start_matches(' '));
  }

  Line::Content(line)
}
