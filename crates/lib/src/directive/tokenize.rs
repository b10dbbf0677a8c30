//! Quote-aware splitting of directive arguments.

use std::mem;

/// Split on whitespace, keeping single- or double-quoted segments together.
///
/// Quotes are removed. A quoted segment glued to unquoted text joins the same
/// argument (`a"b c"` is `ab c`), an empty pair of quotes is an empty
/// argument, and an unterminated quote runs to the end of the input.
pub fn tokenize(input: &str) -> Vec<String> {
  let mut tokens = Vec::new();
  let mut current = String::new();
  let mut in_token = false;
  let mut quote: Option<char> = None;

  for ch in input.chars() {
    match quote {
      Some(q) if ch == q => quote = None,
      Some(_) => current.push(ch),
      None if ch == '"' || ch == '\'' => {
        quote = Some(ch);
        in_token = true;
      }
      None if ch.is_whitespace() => {
        if in_token {
          tokens.push(mem::take(&mut current));
          in_token = false;
        }
      }
      None => {
        current.push(ch);
        in_token = true;
      }
    }
  }

  if in_token {
    tokens.push(current);
  }
  tokens
}
