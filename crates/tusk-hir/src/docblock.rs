//! Docblock parsing.
//!
//! Turns `/** ... */` comment text into a summary plus a list of tags.
//! Tags of different shapes are one sum type rather than a class
//! hierarchy: type-carrying tags (`@param`, `@return`, `@var`), member
//! synthesizers (`@property`, `@method`), and everything else as plain
//! text.

use smol_str::SmolStr;

use crate::types::TypeString;

/// Access constraint of a `@property` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyAccess {
    /// `@property` - readable and writable.
    ReadWrite,
    /// `@property-read`.
    ReadOnly,
    /// `@property-write`.
    WriteOnly,
}

/// One parameter of a `@method` signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodParam {
    /// Declared parameter type, possibly empty.
    pub type_string: TypeString,
    /// Parameter name with the `$` sigil.
    pub name: SmolStr,
}

/// A parsed docblock tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// `@param Type $name description`
    Param {
        /// The annotated type.
        type_string: TypeString,
        /// The parameter name, with sigil.
        name: SmolStr,
        /// Trailing description.
        description: String,
    },
    /// `@return Type description`
    Return {
        /// The annotated type.
        type_string: TypeString,
        /// Trailing description.
        description: String,
    },
    /// `@var Type [$name] description`
    Var {
        /// The annotated type.
        type_string: TypeString,
        /// Optional variable name, with sigil.
        name: Option<SmolStr>,
        /// Trailing description.
        description: String,
    },
    /// `@property[-read|-write] Type $name description`
    Property {
        /// Read/write constraint.
        access: PropertyAccess,
        /// The annotated type.
        type_string: TypeString,
        /// The property name, with sigil.
        name: SmolStr,
        /// Trailing description.
        description: String,
    },
    /// `@method [static] [ReturnType] name(Type $a, $b) description`
    Method {
        /// Whether the magic method is static.
        is_static: bool,
        /// Declared return type, possibly empty.
        return_type: TypeString,
        /// The method name.
        name: SmolStr,
        /// Declared parameters.
        params: Vec<MethodParam>,
        /// Trailing description.
        description: String,
    },
    /// Any other tag, kept as raw text.
    Plain {
        /// Tag name without the `@`.
        tag: SmolStr,
        /// The rest of the tag's text.
        text: String,
    },
}

/// A parsed docblock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Docblock {
    /// Summary text: the first paragraph before any tag.
    pub summary: String,
    /// Tags in source order.
    pub tags: Vec<Tag>,
}

impl Docblock {
    /// Returns the `@return` type, if any tag carries one.
    #[must_use]
    pub fn return_type(&self) -> Option<&TypeString> {
        self.tags.iter().find_map(|tag| match tag {
            Tag::Return { type_string, .. } => Some(type_string),
            _ => None,
        })
    }

    /// Returns the `@param` type for a named parameter (sigil included).
    #[must_use]
    pub fn param_type(&self, param_name: &str) -> Option<&TypeString> {
        self.tags.iter().find_map(|tag| match tag {
            Tag::Param { type_string, name, .. } if name == param_name => Some(type_string),
            _ => None,
        })
    }

    /// Returns the first `@var` tag matching `name`, or an unnamed one.
    #[must_use]
    pub fn var_tag(&self, var_name: &str) -> Option<(&TypeString, &str)> {
        self.tags.iter().find_map(|tag| match tag {
            Tag::Var {
                type_string,
                name,
                description,
            } if name.is_none() || name.as_deref() == Some(var_name) => {
                Some((type_string, description.as_str()))
            }
            _ => None,
        })
    }
}

/// Parses docblock comment text, including the `/**` and `*/` fences.
#[must_use]
pub fn parse(text: &str) -> Docblock {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("/**")
        .map(|rest| rest.strip_suffix("*/").unwrap_or(rest))
        .unwrap_or(trimmed);

    let lines: Vec<String> = body
        .lines()
        .map(|line| {
            let line = line.trim_start();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line).trim_end().to_string()
        })
        .collect();

    let mut summary_lines: Vec<&str> = Vec::new();
    let mut tag_chunks: Vec<String> = Vec::new();
    let mut in_tags = false;

    for line in &lines {
        if line.starts_with('@') {
            in_tags = true;
            tag_chunks.push(line.clone());
        } else if in_tags {
            // Continuation of the previous tag.
            if let Some(last) = tag_chunks.last_mut() {
                if !line.is_empty() {
                    last.push(' ');
                    last.push_str(line);
                }
            }
        } else if line.is_empty() {
            if !summary_lines.is_empty() {
                // The summary is the first paragraph only.
                in_tags = true;
            }
        } else {
            summary_lines.push(line);
        }
    }

    let summary = summary_lines.join(" ");
    let tags = tag_chunks.iter().map(|chunk| parse_tag(chunk)).collect();

    Docblock { summary, tags }
}

fn parse_tag(chunk: &str) -> Tag {
    let chunk = chunk.trim_start_matches('@');
    let (tag_name, rest) = match chunk.find(char::is_whitespace) {
        Some(pos) => (&chunk[..pos], chunk[pos..].trim_start()),
        None => (chunk, ""),
    };

    match tag_name.to_ascii_lowercase().as_str() {
        "param" => parse_param_tag(rest),
        "return" | "returns" => {
            let (type_text, description) = split_leading_type(rest);
            Tag::Return {
                type_string: TypeString::parse(type_text),
                description: description.to_string(),
            }
        }
        "var" => parse_var_tag(rest),
        "property" => parse_property_tag(rest, PropertyAccess::ReadWrite),
        "property-read" => parse_property_tag(rest, PropertyAccess::ReadOnly),
        "property-write" => parse_property_tag(rest, PropertyAccess::WriteOnly),
        "method" => parse_method_tag(rest),
        _ => Tag::Plain {
            tag: SmolStr::new(tag_name),
            text: rest.to_string(),
        },
    }
}

fn parse_param_tag(rest: &str) -> Tag {
    let (first, after_first) = split_leading_type(rest);
    if first.starts_with('$') {
        // Name without a type.
        return Tag::Param {
            type_string: TypeString::empty(),
            name: SmolStr::new(first),
            description: after_first.to_string(),
        };
    }
    let (name, description) = split_leading_word(after_first);
    if name.starts_with('$') {
        Tag::Param {
            type_string: TypeString::parse(first),
            name: SmolStr::new(name),
            description: description.to_string(),
        }
    } else {
        // No parameter name; keep the raw text.
        Tag::Plain {
            tag: SmolStr::new("param"),
            text: rest.to_string(),
        }
    }
}

fn parse_var_tag(rest: &str) -> Tag {
    let (type_text, after_type) = split_leading_type(rest);
    let (maybe_name, after_name) = split_leading_word(after_type);
    if maybe_name.starts_with('$') {
        Tag::Var {
            type_string: TypeString::parse(type_text),
            name: Some(SmolStr::new(maybe_name)),
            description: after_name.to_string(),
        }
    } else {
        Tag::Var {
            type_string: TypeString::parse(type_text),
            name: None,
            description: after_type.to_string(),
        }
    }
}

fn parse_property_tag(rest: &str, access: PropertyAccess) -> Tag {
    let (first, after_first) = split_leading_type(rest);
    if first.starts_with('$') {
        return Tag::Property {
            access,
            type_string: TypeString::empty(),
            name: SmolStr::new(first),
            description: after_first.to_string(),
        };
    }
    let (name, description) = split_leading_word(after_first);
    if name.starts_with('$') {
        Tag::Property {
            access,
            type_string: TypeString::parse(first),
            name: SmolStr::new(name),
            description: description.to_string(),
        }
    } else {
        Tag::Plain {
            tag: SmolStr::new("property"),
            text: rest.to_string(),
        }
    }
}

fn parse_method_tag(rest: &str) -> Tag {
    let mut rest = rest.trim_start();
    let mut is_static = false;
    if let Some(after) = rest.strip_prefix("static ") {
        is_static = true;
        rest = after.trim_start();
    }

    let paren = match rest.find('(') {
        Some(pos) => pos,
        None => {
            return Tag::Plain {
                tag: SmolStr::new("method"),
                text: rest.to_string(),
            }
        }
    };

    let head = rest[..paren].trim();
    let (return_type, name) = match split_leading_type(head) {
        (type_text, name) if !name.is_empty() => (TypeString::parse(type_text), name.trim()),
        _ => (TypeString::empty(), head),
    };
    if name.is_empty() {
        return Tag::Plain {
            tag: SmolStr::new("method"),
            text: rest.to_string(),
        };
    }

    let after_paren = &rest[paren + 1..];
    let close = after_paren.find(')').unwrap_or(after_paren.len());
    let param_text = &after_paren[..close];
    let description = after_paren[close..]
        .trim_start_matches(')')
        .trim()
        .to_string();

    let params = split_top_level_commas(param_text)
        .into_iter()
        .filter_map(|part| {
            let part = part.trim();
            if part.is_empty() {
                return None;
            }
            let (first, second) = split_leading_type(part);
            if first.starts_with('$') {
                Some(MethodParam {
                    type_string: TypeString::empty(),
                    name: SmolStr::new(trim_default(first)),
                })
            } else {
                let (name, _) = split_leading_word(second);
                if name.starts_with('$') {
                    Some(MethodParam {
                        type_string: TypeString::parse(first),
                        name: SmolStr::new(trim_default(name)),
                    })
                } else {
                    None
                }
            }
        })
        .collect();

    Tag::Method {
        is_static,
        return_type,
        name: SmolStr::new(name),
        params,
        description,
    }
}

/// Strips a trailing `= default` fragment from a parameter name.
fn trim_default(name: &str) -> &str {
    name.split('=').next().unwrap_or(name).trim()
}

/// Splits off the first whitespace-delimited word.
fn split_leading_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(pos) => (&text[..pos], text[pos..].trim_start()),
        None => (text, ""),
    }
}

/// Splits off a leading type expression. Whitespace inside `<...>` or
/// `(...)` does not end the type, so `array<int, string>` stays whole.
fn split_leading_type(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    let mut depth = 0u32;
    for (i, ch) in text.char_indices() {
        match ch {
            '<' | '(' => depth += 1,
            '>' | ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                return (&text[..i], text[i..].trim_start());
            }
            _ => {}
        }
    }
    (text, "")
}

/// Splits on commas outside `<...>` parameter lists.
fn split_top_level_commas(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0u32;
    let mut start = 0usize;
    for (i, ch) in text.char_indices() {
        match ch {
            '<' | '(' => depth += 1,
            '>' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_and_param() {
        let doc = parse(
            "/**\n * Sends a message.\n *\n * Longer prose.\n * @param string $to target address\n * @return bool\n */",
        );
        assert_eq!(doc.summary, "Sends a message.");
        assert_eq!(
            doc.param_type("$to"),
            Some(&TypeString::parse("string"))
        );
        assert_eq!(doc.return_type(), Some(&TypeString::parse("bool")));
    }

    #[test]
    fn test_var_with_and_without_name() {
        let doc = parse("/** @var int|null $count remaining items */");
        let (ty, desc) = doc.var_tag("$count").unwrap();
        assert_eq!(ty, &TypeString::parse("int|null"));
        assert_eq!(desc, "remaining items");

        let doc = parse("/** @var string */");
        assert!(doc.var_tag("$anything").is_some());
    }

    #[test]
    fn test_property_tags() {
        let doc = parse("/** @property-read string $name The display name */");
        match &doc.tags[0] {
            Tag::Property {
                access,
                type_string,
                name,
                description,
            } => {
                assert_eq!(*access, PropertyAccess::ReadOnly);
                assert_eq!(type_string, &TypeString::parse("string"));
                assert_eq!(name, "$name");
                assert_eq!(description, "The display name");
            }
            other => panic!("unexpected tag: {other:?}"),
        }
    }

    #[test]
    fn test_method_tag() {
        let doc = parse("/** @method static Foo|null find(int $id, array $columns) finder */");
        match &doc.tags[0] {
            Tag::Method {
                is_static,
                return_type,
                name,
                params,
                description,
            } => {
                assert!(is_static);
                assert_eq!(return_type, &TypeString::parse("Foo|null"));
                assert_eq!(name, "find");
                assert_eq!(params.len(), 2);
                assert_eq!(params[0].name, "$id");
                assert_eq!(params[0].type_string, TypeString::parse("int"));
                assert_eq!(description, "finder");
            }
            other => panic!("unexpected tag: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tag_is_plain() {
        let doc = parse("/** @deprecated use send() instead */");
        match &doc.tags[0] {
            Tag::Plain { tag, text } => {
                assert_eq!(tag, "deprecated");
                assert_eq!(text, "use send() instead");
            }
            other => panic!("unexpected tag: {other:?}"),
        }
    }

    #[test]
    fn test_multiline_tag_continuation() {
        let doc = parse("/**\n * @param array<int, string>\n *   $items item list\n */");
        assert!(doc.param_type("$items").is_some());
    }
}
