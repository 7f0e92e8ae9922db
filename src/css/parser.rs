//! Declaration-list parsing
//!
//! Style text reaches an element as a sequence of `property: value;` pairs.
//! This module splits that text into [`Declaration`]s with their source
//! lines and feeds them through the property setter, logging a warning for
//! every declaration the setter rejects. Parsing recovers at the next `;`,
//! so one malformed declaration never takes down the rest of the block.

use cssparser::{ParseError as CssParseError, Parser, ParserInput, Token};
use tracing::warn;

use crate::style::properties::StyleValues;
use crate::style::setter::set_property_at;

/// One `property: value` pair with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
  pub property: String,
  pub value: String,
  pub important: bool,
  /// 1-based source line of the property name
  pub line: u32,
}

/// Parses a declaration list (`width: 10px; color: red;`).
///
/// Malformed declarations are skipped with a warning; everything that can
/// be read is returned.
pub fn parse_declarations(text: &str) -> Vec<Declaration> {
  let mut input = ParserInput::new(text);
  let mut parser = Parser::new(&mut input);
  let mut declarations = Vec::new();

  loop {
    parser.skip_whitespace();
    if parser.is_exhausted() {
      break;
    }
    let location = parser.current_source_location();
    let line = location.line + 1;

    let property = match parser.expect_ident() {
      Ok(ident) => ident.to_string(),
      Err(_) => {
        warn!(line, "skipping malformed declaration");
        skip_to_semicolon(&mut parser);
        continue;
      }
    };
    if parser.expect_colon().is_err() {
      warn!(property = %property, line, "expected ':' after property name");
      skip_to_semicolon(&mut parser);
      continue;
    }

    let value_start = parser.position();
    let mut important = false;
    loop {
      match parser.next() {
        Ok(Token::Semicolon) | Err(_) => break,
        Ok(Token::Delim('!')) => {
          if parser
            .try_parse(|p| p.expect_ident_matching("important"))
            .is_ok()
          {
            important = true;
          }
        }
        Ok(Token::Function(_)) => {
          // Consume the whole function so nested ';' cannot end the value
          let _ = parser.parse_nested_block(|p| {
            while !p.is_exhausted() {
              let _ = p.next();
            }
            Ok::<_, CssParseError<()>>(())
          });
        }
        Ok(_) => {}
      }
    }

    let mut value = parser.slice_from(value_start).trim();
    value = value.trim_end_matches(';').trim_end();
    if important {
      value = value.trim_end_matches("!important").trim_end();
    }
    if value.is_empty() {
      warn!(property = %property, line, "declaration has no value");
      continue;
    }

    declarations.push(Declaration {
      property,
      value: value.to_string(),
      important,
      line,
    });
  }

  declarations
}

fn skip_to_semicolon<'i, 't>(parser: &mut Parser<'i, 't>) {
  loop {
    match parser.next() {
      Ok(Token::Semicolon) | Err(_) => break,
      Ok(Token::Function(_))
      | Ok(Token::ParenthesisBlock)
      | Ok(Token::CurlyBracketBlock)
      | Ok(Token::SquareBracketBlock) => {
        let _ = parser.parse_nested_block(|p| {
          while !p.is_exhausted() {
            let _ = p.next();
          }
          Ok::<_, CssParseError<()>>(())
        });
      }
      Ok(_) => {}
    }
  }
}

/// Parses style text and applies every declaration to `style`.
///
/// Declarations the setter rejects are reported with their property, value
/// and line, and the rest of the block still applies. Returns how many
/// declarations applied.
pub fn apply_style_text(style: &mut StyleValues, text: &str) -> usize {
  let mut applied = 0;
  for declaration in parse_declarations(text) {
    if set_property_at(style, &declaration.property, &declaration.value, declaration.line) {
      applied += 1;
    } else {
      warn!(
        property = %declaration.property,
        value = %declaration.value,
        line = declaration.line,
        "ignoring declaration that failed to parse"
      );
    }
  }
  applied
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::style::properties::{PropertyId, PropertyValue};
  use crate::style::values::Length;

  #[test]
  fn test_parse_simple_declarations() {
    let declarations = parse_declarations("width: 10px; color: red;");
    assert_eq!(declarations.len(), 2);
    assert_eq!(declarations[0].property, "width");
    assert_eq!(declarations[0].value, "10px");
    assert_eq!(declarations[1].property, "color");
  }

  #[test]
  fn test_missing_trailing_semicolon() {
    let declarations = parse_declarations("opacity: 0.5");
    assert_eq!(declarations.len(), 1);
    assert_eq!(declarations[0].value, "0.5");
  }

  #[test]
  fn test_source_lines_are_recorded() {
    let declarations = parse_declarations("width: 10px;\nheight: 20px;\n\ncolor: red;");
    assert_eq!(declarations[0].line, 1);
    assert_eq!(declarations[1].line, 2);
    assert_eq!(declarations[2].line, 4);
  }

  #[test]
  fn test_important_is_stripped_from_value() {
    let declarations = parse_declarations("color: red !important;");
    assert_eq!(declarations.len(), 1);
    assert!(declarations[0].important);
    assert_eq!(declarations[0].value, "red");
  }

  #[test]
  fn test_function_values_keep_inner_separators() {
    let declarations = parse_declarations("background-image: linear-gradient(to right, red, blue);");
    assert_eq!(declarations.len(), 1);
    assert!(declarations[0].value.contains("to right, red, blue"));
  }

  #[test]
  fn test_malformed_declaration_recovers() {
    let declarations = parse_declarations("}}; width: 10px;");
    assert_eq!(declarations.len(), 1);
    assert_eq!(declarations[0].property, "width");
  }

  #[test]
  fn test_apply_style_text() {
    let mut style = StyleValues::new();
    let applied = apply_style_text(&mut style, "width: 10px; mystery: 4; opacity: 0.25;");
    assert_eq!(applied, 2);
    assert_eq!(
      style.get(PropertyId::Width),
      Some(&PropertyValue::Length(Length::px(10.0)))
    );
    assert_eq!(style.get(PropertyId::Opacity), Some(&PropertyValue::Float(0.25)));
    // the rejected declaration still leaves a diagnostic record
    let raw = style.raw_properties();
    assert_eq!(raw.len(), 3);
    assert!(!raw[1].parsed);
    assert_eq!(raw[1].line, 1);
  }
}
