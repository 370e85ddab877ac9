//! Compound CSS selectors: `tag`, `#id`, `.class`, `[attr]`, `[attr="v"]`
//! and any combination of them without whitespace.

use std::str::FromStr;

use crate::dom::Element;
use crate::error::EmbedError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrMatcher {
    Present(String),
    Equals(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttrMatcher>,
}

impl Selector {
    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag
            && tag != element.tag()
        {
            return false;
        }
        if let Some(id) = &self.id
            && element.attribute("id") != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attributes.iter().all(|m| match m {
            AttrMatcher::Present(name) => element.has_attribute(name),
            AttrMatcher::Equals(name, value) => element.attribute(name) == Some(value.as_str()),
        })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

impl FromStr for Selector {
    type Err = EmbedError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fail = |reason: &str| EmbedError::InvalidSelector {
            selector: input.to_string(),
            reason: reason.to_string(),
        };
        let chars: Vec<char> = input.trim().chars().collect();
        if chars.is_empty() {
            return Err(fail("empty selector"));
        }

        let mut selector = Selector::default();
        let mut pos = 0;

        if chars[0] == '*' {
            pos = 1;
        } else if is_ident_char(chars[0]) {
            selector.tag = Some(take_ident(&chars, &mut pos).to_ascii_lowercase());
        }

        while pos < chars.len() {
            match chars[pos] {
                '#' => {
                    pos += 1;
                    let id = take_ident(&chars, &mut pos);
                    if id.is_empty() {
                        return Err(fail("expected an id after '#'"));
                    }
                    selector.id = Some(id);
                }
                '.' => {
                    pos += 1;
                    let class = take_ident(&chars, &mut pos);
                    if class.is_empty() {
                        return Err(fail("expected a class after '.'"));
                    }
                    selector.classes.push(class);
                }
                '[' => {
                    pos += 1;
                    let name = take_ident(&chars, &mut pos);
                    if name.is_empty() {
                        return Err(fail("expected an attribute name"));
                    }
                    match chars.get(pos) {
                        Some(']') => {
                            pos += 1;
                            selector.attributes.push(AttrMatcher::Present(name));
                        }
                        Some('=') => {
                            pos += 1;
                            let value = match chars.get(pos) {
                                Some(&quote @ ('"' | '\'')) => {
                                    pos += 1;
                                    let start = pos;
                                    while pos < chars.len() && chars[pos] != quote {
                                        pos += 1;
                                    }
                                    if pos >= chars.len() {
                                        return Err(fail("unterminated quoted value"));
                                    }
                                    let value: String = chars[start..pos].iter().collect();
                                    pos += 1;
                                    value
                                }
                                _ => take_ident(&chars, &mut pos),
                            };
                            if chars.get(pos) != Some(&']') {
                                return Err(fail("expected ']'"));
                            }
                            pos += 1;
                            selector.attributes.push(AttrMatcher::Equals(name, value));
                        }
                        _ => return Err(fail("expected ']' or '='")),
                    }
                }
                c if c.is_whitespace() || matches!(c, '>' | '+' | '~' | ',') => {
                    return Err(fail("combinators are not supported"));
                }
                _ => return Err(fail("unexpected character")),
            }
        }

        Ok(selector)
    }
}
