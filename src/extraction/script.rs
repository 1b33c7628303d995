/*!
 * Quote-aware scanning of string literals in script lines.
 */

/// A quoted literal found in a script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    /// Text between the quotes, escapes left as written
    pub body: String,
}

/// Every complete `"..."` or `'...'` literal in `line`, in order
///
/// A backslash escapes the next character. An unterminated literal at the
/// end of the line is dropped.
pub fn string_literals(line: &str) -> Vec<Literal> {
    let mut literals = Vec::new();
    let mut chars = line.char_indices();

    while let Some((_, c)) = chars.next() {
        if c != '"' && c != '\'' {
            continue;
        }
        let quote = c;
        let body_start = chars.offset();
        let mut escaped = false;

        for (index, inner) in chars.by_ref() {
            if escaped {
                escaped = false;
            } else if inner == '\\' {
                escaped = true;
            } else if inner == quote {
                literals.push(Literal {
                    body: line[body_start..index].to_string(),
                });
                break;
            }
        }
    }

    literals
}
