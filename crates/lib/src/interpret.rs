//! The line-by-line directive interpreter.
//!
//! Each line is fully handled, side effects included, before the next one is
//! looked at. Nothing a directive does can stop the run: failures become
//! diagnostics on the [`Context`] and interpretation moves on.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::context::Context;
use crate::directive::{Directive, Line, classify};
use crate::fsops;
use crate::init::{InitOptions, init};
use crate::resolve::{Resolution, ResolveFlags};

/// Interpret every line of `source` against `ctx`.
pub fn run(ctx: &mut Context, source: &str) {
  for (index, line) in source.lines().enumerate() {
    ctx.set_line(index + 1);
    execute_line(ctx, line);
  }
}

/// Interpret a single source line.
pub fn execute_line(ctx: &mut Context, line: &str) {
  match classify(line) {
    Line::Blank => {}
    Line::Directive(directive) => execute(ctx, directive),
    Line::Malformed(e) => ctx.skip(e.to_string()),
    Line::Content(content) => write_content(ctx, content),
  }
}

/// Run one directive.
pub fn execute(ctx: &mut Context, directive: Directive) {
  trace!(line = ctx.line(), directive = directive.name(), "dispatch");

  match directive {
    Directive::Root => go_root(ctx),
    Directive::Home => go_home(ctx),
    Directive::SetHome { path } => set_home(ctx, path.as_deref()),
    Directive::Init {
      namespace,
      pack_format,
      description,
    } => init_pack(ctx, &namespace, pack_format.as_deref(), description.as_deref()),
    Directive::Cd { path } => cd(ctx, &path),
    Directive::Mkdir { path } => mkdir(ctx, &path),
    Directive::Rmdir { path } => remove_dir(ctx, Some(&path), true),
    Directive::Clear { path } => remove_dir(ctx, path.as_deref(), false),
    Directive::Open { path } => open(ctx, &path),
    Directive::Close => close(ctx),
    Directive::Del { path } => del(ctx, &path),
    Directive::Log { message } => ctx.log(message),
  }
}

fn write_content(ctx: &mut Context, content: &str) {
  match ctx.files().write(content) {
    Ok(true) => {}
    Ok(false) => trace!(line = ctx.line(), "no open file, content dropped"),
    Err(e) => {
      let path = ctx.files().current().map(|p| p.display().to_string()).unwrap_or_default();
      ctx.skip(format!("failed to write to {path}: {e}"));
    }
  }
}

fn go_root(ctx: &mut Context) {
  let Some(root) = ctx.root().map(PathBuf::from) else {
    debug!(line = ctx.line(), "root is not set");
    return;
  };
  if !root.is_dir() {
    ctx.skip(format!("root directory no longer exists: {}", root.display()));
    return;
  }
  ctx.set_cwd(root);
}

fn go_home(ctx: &mut Context) {
  let Some(home) = ctx.home().map(PathBuf::from) else {
    ctx.skip("home is not set");
    return;
  };
  if !home.is_dir() {
    ctx.skip(format!("home directory no longer exists: {}", home.display()));
    return;
  }
  ctx.set_cwd(home);
}

fn set_home(ctx: &mut Context, path: Option<&str>) {
  let Some(raw) = path else {
    let cwd = ctx.cwd().to_path_buf();
    if cwd.is_dir() {
      ctx.set_home(cwd);
    } else {
      ctx.skip(format!("working location no longer exists: {}", cwd.display()));
    }
    return;
  };

  match ctx.resolve(raw, ResolveFlags::DIR) {
    Resolution::Present(dir) => ctx.set_home(dir),
    Resolution::Absent(dir) => ctx.skip(format!("sethome: directory not found: {}", dir.display())),
    Resolution::Invalid(e) => ctx.skip(format!("sethome: invalid path '{raw}': {e}")),
  }
}

fn init_pack(ctx: &mut Context, namespace: &str, pack_format: Option<&str>, description: Option<&str>) {
  let result = InitOptions::from_args(namespace, pack_format, description).and_then(|options| init(ctx, &options));
  if let Err(e) = result {
    ctx.skip(format!("init: {e}"));
  }
}

fn cd(ctx: &mut Context, raw: &str) {
  match ctx.resolve(raw, ResolveFlags::DIR) {
    Resolution::Present(dir) => ctx.set_cwd(dir),
    Resolution::Absent(dir) => ctx.skip(format!("cd: directory not found: {}", dir.display())),
    Resolution::Invalid(e) => ctx.skip(format!("cd: invalid path '{raw}': {e}")),
  }
}

fn mkdir(ctx: &mut Context, raw: &str) {
  match ctx.resolve(raw, ResolveFlags::DIR) {
    Resolution::Absent(dir) => {
      if let Err(e) = fsops::create_dir(&dir) {
        ctx.skip(format!("mkdir: failed to create {}: {e}", dir.display()));
      }
    }
    Resolution::Present(dir) => ctx.skip(format!("mkdir: directory already exists: {}", dir.display())),
    Resolution::Invalid(e) => ctx.skip(format!("mkdir: invalid path '{raw}': {e}")),
  }
}

/// `rmdir` (`delete_self`) and `clear` (keep the directory, default to the
/// working location). Reports exactly once, after the traversal.
fn remove_dir(ctx: &mut Context, path: Option<&str>, delete_self: bool) {
  let name = if delete_self { "rmdir" } else { "clear" };
  let raw = path.unwrap_or(".");

  let dir = match ctx.resolve(raw, ResolveFlags::DIR) {
    Resolution::Present(dir) => dir,
    Resolution::Absent(dir) => {
      ctx.skip(format!("{name}: directory not found: {}", dir.display()));
      return;
    }
    Resolution::Invalid(e) => {
      ctx.skip(format!("{name}: invalid path '{raw}': {e}"));
      return;
    }
  };

  let report = fsops::delete_recursive(&dir, delete_self);
  for failure in &report.failures {
    ctx.suppress(format!("{name}: {failure}"));
  }

  if report.is_clean() {
    debug!(
      line = ctx.line(),
      path = %dir.display(),
      files = report.files_removed,
      dirs = report.dirs_removed,
      "{name} complete"
    );
  } else {
    debug!(
      line = ctx.line(),
      path = %dir.display(),
      failures = report.failures.len(),
      "{name} finished with failures"
    );
  }
}

fn open(ctx: &mut Context, raw: &str) {
  let path = match ctx.resolve(raw, ResolveFlags::FILE) {
    Resolution::Present(path) | Resolution::Absent(path) => path,
    Resolution::Invalid(e) => {
      ctx.skip(format!("open: invalid path '{raw}': {e}"));
      return;
    }
  };

  match ctx.files_mut().open(&path) {
    Ok(()) => debug!(line = ctx.line(), path = %path.display(), "opened"),
    Err(e) => ctx.skip(format!("open: failed to open {}: {e}", path.display())),
  }
}

fn close(ctx: &mut Context) {
  match ctx.files_mut().close() {
    Some(path) => debug!(line = ctx.line(), path = %path.display(), "closed"),
    None => ctx.skip("close: no file is open"),
  }
}

fn del(ctx: &mut Context, raw: &str) {
  match ctx.resolve(raw, ResolveFlags::FILE) {
    Resolution::Present(path) => match fsops::delete_file(&path) {
      Ok(true) => {}
      Ok(false) => ctx.skip(format!("del: file not found: {}", path.display())),
      Err(e) => ctx.skip(format!("del: failed to delete {}: {e}", path.display())),
    },
    Resolution::Absent(path) => ctx.skip(format!("del: file not found: {}", path.display())),
    Resolution::Invalid(e) => ctx.skip(format!("del: invalid path '{raw}': {e}")),
  }
}
