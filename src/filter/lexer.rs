use super::error::SyntaxError;

/// Tokens found at the outermost nesting depth of a filter fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens<'a> {
    pub tokens: Vec<&'a str>,
    /// Whether an unquoted `(` appeared anywhere in the fragment
    pub saw_bracket: bool,
}

/// Check that unquoted parentheses are balanced
///
/// Single quotes toggle a quoted span in which parentheses are not counted.
pub fn validate_brackets(text: &str) -> Result<(), SyntaxError> {
    let mut opened = 0usize;
    let mut closed = 0usize;
    let mut in_quotes = false;

    for c in text.chars() {
        match c {
            '\'' => in_quotes = !in_quotes,
            '(' if !in_quotes => opened += 1,
            ')' if !in_quotes => {
                closed += 1;
                if closed > opened {
                    return Err(SyntaxError::UnbalancedBrackets { missing: '(' });
                }
            }
            _ => {}
        }
    }

    if opened != closed {
        return Err(SyntaxError::UnbalancedBrackets { missing: ')' });
    }
    Ok(())
}

/// Split `text` into tokens without descending into brackets
///
/// A bracketed span at depth 0 becomes one token, parentheses included. Spaces
/// separate tokens only at depth 0 and outside quotes. Empty tokens are dropped.
pub fn tokenize(text: &str) -> Tokens<'_> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut saw_bracket = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '\'' => in_quotes = !in_quotes,
            ' ' if depth == 0 && !in_quotes => {
                push_token(&mut tokens, text, start, i);
                start = i + 1;
            }
            '(' if !in_quotes => {
                if depth == 0 {
                    push_token(&mut tokens, text, start, i);
                    start = i;
                }
                saw_bracket = true;
                depth += 1;
            }
            ')' if !in_quotes => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    push_token(&mut tokens, text, start, i + 1);
                    start = i + 1;
                }
            }
            _ => {}
        }
    }
    push_token(&mut tokens, text, start, text.len());

    Tokens {
        tokens,
        saw_bracket,
    }
}

fn push_token<'a>(tokens: &mut Vec<&'a str>, text: &'a str, from: usize, to: usize) {
    if to > from {
        tokens.push(&text[from..to]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(text: &str) -> Option<char> {
        match validate_brackets(text) {
            Ok(()) => None,
            Err(SyntaxError::UnbalancedBrackets { missing }) => Some(missing),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_balanced_brackets() {
        assert_eq!(missing("(id lt 20) AND (id lt 20)"), None);
        assert_eq!(missing("(Name eq 'a ) b')"), None);
        assert_eq!(missing("id lt 20"), None);
    }

    #[test]
    fn test_unbalanced_brackets() {
        assert_eq!(missing("(id lt 20"), Some(')'));
        assert_eq!(missing("id lt 20)"), Some('('));
        assert_eq!(missing("((id lt 20) OR (id lt 20)"), Some(')'));
        assert_eq!(missing("((id lt 20) AND (id lt 20)))"), Some('('));
        assert_eq!(missing("((id lt 20))) AND (id lt 20"), Some('('));
        assert_eq!(missing("((EntryUser.FirstName eq '20))') AND (id lt 20"), Some(')'));
    }

    #[test]
    fn test_tokenize_flat_condition() {
        let tokens = tokenize("  id   lt 20 ");
        assert_eq!(tokens.tokens, vec!["id", "lt", "20"]);
        assert!(!tokens.saw_bracket);
    }

    #[test]
    fn test_tokenize_keeps_quoted_spaces() {
        let tokens = tokenize("Name like 'Valid ( () Name'");
        assert_eq!(tokens.tokens, vec!["Name", "like", "'Valid ( () Name'"]);
        assert!(!tokens.saw_bracket);
    }

    #[test]
    fn test_tokenize_only_outer_depth() {
        let tokens = tokenize("((a eq 1) or (b eq 2)) And(c eq 3)");
        assert_eq!(
            tokens.tokens,
            vec!["((a eq 1) or (b eq 2))", "And", "(c eq 3)"]
        );
        assert!(tokens.saw_bracket);
    }

    #[test]
    fn test_tokenize_quoted_brackets_inside_group() {
        let tokens = tokenize("(Name eq '20) (id lt 20))')  (id eq 2)");
        assert_eq!(
            tokens.tokens,
            vec!["(Name eq '20) (id lt 20))')", "(id eq 2)"]
        );
    }
}
