//! Line and token splitting. Pure functions: the same text always yields the
//! same lines.

/// One non-empty script line, split into tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// 1-based position among the lines of the submission, counting blank ones.
    pub number: usize,
    /// The line as written, surrounding whitespace trimmed.
    pub raw: String,
    pub tokens: Vec<String>,
}

impl Line {
    /// First token lower-cased. Empty lines never reach here.
    pub fn keyword(&self) -> String {
        self.tokens[0].to_lowercase()
    }

    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    /// `<name> = <value>`: the second token is exactly `=`.
    pub fn is_assignment(&self) -> bool {
        self.tokens.get(1).is_some_and(|t| t == "=")
    }
}

/// Splits a line on whitespace and commas, dropping empty pieces.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits script text on CR and/or LF and tokenizes each line.
/// Lines with no tokens are dropped but still count toward line numbers.
pub fn split_lines(source: &str) -> Vec<Line> {
    // `\r\n` yields an empty piece between the two; it is dropped below and
    // must not bump the count.
    let mut number = 0;
    let mut lines = Vec::new();
    let mut rest = source;
    while !rest.is_empty() {
        let end = rest.find(['\r', '\n']).unwrap_or(rest.len());
        let text = &rest[..end];
        number += 1;
        let sep = match rest[end..].as_bytes() {
            [b'\r', b'\n', ..] => 2,
            []                 => 0,
            _                  => 1,
        };
        rest = &rest[end + sep..];

        let tokens = tokenize(text);
        if !tokens.is_empty() {
            lines.push(Line { number, raw: text.trim().to_string(), tokens });
        }
    }
    lines
}
