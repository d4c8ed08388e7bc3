/// Comment removal for shader sources
///
/// Comments are blanked rather than deleted: every comment character is
/// replaced by a space and newlines are kept, so line and column positions
/// in the stripped text match the original. Quoted spans (`"..."`, `'...'`)
/// are opaque, a comment marker inside one is left alone and cannot open
/// or close a comment.
///
/// Quotes are the only opaque spans. GLSL has no regex literal syntax, so a
/// `/` outside a quote is either a comment marker or division.

/// Removes `//` and `/* */` comments
pub struct CommentStripper;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Quoted(char),
    LineComment,
    BlockComment,
}

impl CommentStripper {
    /// Strip comments from `source`
    ///
    /// Never fails: an unterminated block comment blanks the rest of the
    /// input, an unterminated quote ends at the end of its line.
    pub fn strip(source: &str) -> String {
        let mut out = String::with_capacity(source.len());
        let mut state = State::Code;
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match state {
                State::Code => match c {
                    '"' | '\'' => {
                        state = State::Quoted(c);
                        out.push(c);
                    }
                    '/' if chars.peek() == Some(&'/') => {
                        chars.next();
                        state = State::LineComment;
                        out.push_str("  ");
                    }
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        state = State::BlockComment;
                        out.push_str("  ");
                    }
                    _ => out.push(c),
                },
                State::Quoted(quote) => {
                    out.push(c);
                    if c == '\\' {
                        // Escaped character never closes the span
                        if let Some(&next) = chars.peek() {
                            if next != '\n' {
                                out.push(next);
                                chars.next();
                            }
                        }
                    } else if c == quote || c == '\n' {
                        state = State::Code;
                    }
                }
                State::LineComment => {
                    if c == '\n' {
                        state = State::Code;
                        out.push('\n');
                    } else {
                        out.push(' ');
                    }
                }
                State::BlockComment => {
                    if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        state = State::Code;
                        out.push_str("  ");
                    } else if c == '\n' {
                        out.push('\n');
                    } else {
                        out.push(' ');
                    }
                }
            }
        }

        out
    }
}

#[cfg(test)]
#[path = "comments_tests.rs"]
mod tests;
