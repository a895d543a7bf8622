//! Meaning field decoding
//!
//! The seed file stores meanings as a nested list literal of sense/reading
//! pairs, e.g. `[[['물'], ['수']], [['고를', '평평할'], ['평']]]`. Each pair is
//! rendered as `"물 [수]"` and pairs are joined with `" | "`.

use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Str(String),
    List(Vec<Literal>),
}

/// Render a raw meaning field for display. Input that does not parse as the
/// expected nested list is returned unchanged.
pub fn format_meaning(raw: &str) -> String {
    match parse_literal(raw).and_then(|lit| render(&lit)) {
        Some(text) => text,
        None => raw.to_string(),
    }
}

fn render(lit: &Literal) -> Option<String> {
    let Literal::List(items) = lit else {
        return None;
    };

    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        let Literal::List(pair) = item else {
            return None;
        };
        let senses = strings(pair.first()?)?;
        let sounds = match pair.get(1) {
            Some(lit) => strings(lit)?,
            None => Vec::new(),
        };

        let meaning_text = senses.join(", ");
        if sounds.is_empty() {
            parts.push(meaning_text);
        } else {
            parts.push(format!("{} [{}]", meaning_text, sounds.join("/")));
        }
    }

    Some(parts.join(" | "))
}

/// A sense or reading slot: a list of strings, or a bare string standing for one
fn strings(lit: &Literal) -> Option<Vec<&str>> {
    match lit {
        Literal::List(items) => items
            .iter()
            .map(|i| match i {
                Literal::Str(s) => Some(s.as_str()),
                Literal::List(_) => None,
            })
            .collect(),
        Literal::Str(s) => Some(vec![s.as_str()]),
    }
}

fn parse_literal(input: &str) -> Option<Literal> {
    let mut chars = input.trim().chars().peekable();
    let lit = parse_value(&mut chars)?;
    skip_ws(&mut chars);
    if chars.next().is_some() {
        return None;
    }
    Some(lit)
}

fn skip_ws(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

fn parse_value(chars: &mut Peekable<Chars<'_>>) -> Option<Literal> {
    skip_ws(chars);
    match chars.peek()? {
        '[' => parse_list(chars),
        '\'' | '"' => parse_string(chars).map(Literal::Str),
        _ => None,
    }
}

fn parse_list(chars: &mut Peekable<Chars<'_>>) -> Option<Literal> {
    chars.next(); // '['
    let mut items = Vec::new();
    loop {
        skip_ws(chars);
        if chars.peek() == Some(&']') {
            chars.next();
            return Some(Literal::List(items));
        }
        items.push(parse_value(chars)?);
        skip_ws(chars);
        match chars.next()? {
            ',' => continue,
            ']' => return Some(Literal::List(items)),
            _ => return None,
        }
    }
}

fn parse_string(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let quote = chars.next()?;
    let mut out = String::new();
    loop {
        match chars.next()? {
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                other => out.push(other),
            },
            c if c == quote => return Some(out),
            c => out.push(c),
        }
    }
}
