//! Response decoding helpers
//!
//! JSON backends deserialize straight into typed structs with `serde`, so
//! the only decoder living here is a small XML element-tree conversion for
//! the one XML backend. It covers the subset of XML that job search APIs
//! actually emit: nested elements, repeated siblings (which become JSON
//! arrays), text content with standard entities, comments and a prolog.
//! Attributes are skipped.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Convert an XML document into a JSON value.
///
/// The root element becomes a single-key object, elements with children
/// become objects, repeated sibling elements collapse into arrays, and
/// text content is typed (integer, float, boolean, string). Empty elements
/// are `null`.
pub fn xml_to_value(body: &str) -> Result<Value> {
    let mut parser = Parser::new(body);
    parser.skip_misc();
    let (name, value) = parser.parse_element()?;
    parser.skip_misc();
    if !parser.at_end() {
        return Err(Error::xml("trailing content after root element"));
    }
    let mut root = Map::new();
    root.insert(name, value);
    Ok(Value::Object(root))
}

/// View a decoded value as a list of elements.
///
/// Repeated siblings decode to an array, a single occurrence to the bare
/// value, and an empty element to `null`; callers iterating records want
/// all three to look like a list.
pub fn element_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn advance(&mut self, bytes: usize) {
        self.pos += bytes;
    }

    /// Skip whitespace, the XML prolog, DOCTYPE and comments
    fn skip_misc(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.advance(rest.len() - trimmed.len());

            if trimmed.starts_with("<?") {
                match trimmed.find("?>") {
                    Some(end) => self.advance(end + 2),
                    None => self.pos = self.input.len(),
                }
            } else if trimmed.starts_with("<!--") {
                match trimmed.find("-->") {
                    Some(end) => self.advance(end + 3),
                    None => self.pos = self.input.len(),
                }
            } else if trimmed.starts_with("<!") {
                match trimmed.find('>') {
                    Some(end) => self.advance(end + 1),
                    None => self.pos = self.input.len(),
                }
            } else {
                return;
            }
        }
    }

    /// Parse one element starting at `<name ...>`, returning its name and
    /// decoded value
    fn parse_element(&mut self) -> Result<(String, Value)> {
        if !self.rest().starts_with('<') {
            return Err(Error::xml("expected opening tag"));
        }
        self.advance(1);

        let name = self.read_name()?;

        // skip attributes up to the tag end
        let rest = self.rest();
        let tag_end = rest
            .find('>')
            .ok_or_else(|| Error::xml(format!("unterminated tag <{name}")))?;
        let self_closing = rest[..tag_end].ends_with('/');
        self.advance(tag_end + 1);

        if self_closing {
            return Ok((name, Value::Null));
        }

        let mut children: Map<String, Value> = Map::new();
        let mut text = String::new();

        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return Err(Error::xml(format!("missing closing tag for <{name}>")));
            }

            if rest.starts_with("</") {
                self.advance(2);
                let close_name = self.read_name()?;
                if close_name != name {
                    return Err(Error::xml(format!(
                        "mismatched closing tag: expected </{name}>, found </{close_name}>"
                    )));
                }
                let rest = self.rest();
                let end = rest
                    .find('>')
                    .ok_or_else(|| Error::xml("unterminated closing tag"))?;
                self.advance(end + 1);
                break;
            }

            if rest.starts_with("<!--") {
                match rest.find("-->") {
                    Some(end) => self.advance(end + 3),
                    None => return Err(Error::xml("unterminated comment")),
                }
                continue;
            }

            if rest.starts_with('<') {
                let (child_name, child_value) = self.parse_element()?;
                insert_child(&mut children, child_name, child_value);
                continue;
            }

            let chunk_end = rest.find('<').unwrap_or(rest.len());
            text.push_str(&rest[..chunk_end]);
            self.advance(chunk_end);
        }

        if children.is_empty() {
            Ok((name, text_value(text.trim())))
        } else {
            // mixed content: element children win, surrounding text dropped
            Ok((name, Value::Object(children)))
        }
    }

    fn read_name(&mut self) -> Result<String> {
        let rest = self.rest();
        let end = rest
            .find(|c: char| !c.is_alphanumeric() && c != '_' && c != '-' && c != '.' && c != ':')
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(Error::xml("empty tag name"));
        }
        let name = rest[..end].to_string();
        self.advance(end);
        Ok(name)
    }
}

/// Insert a child element, collapsing repeated siblings into an array
fn insert_child(map: &mut Map<String, Value>, name: String, value: Value) {
    match map.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(name, value);
        }
    }
}

/// Type a text node: integer, float, boolean, or string
fn text_value(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    let unescaped = unescape(text);
    if let Ok(n) = unescaped.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = unescaped.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    match unescaped.as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(unescaped),
    }
}

/// Resolve the predefined XML entities
fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests;
