/// SVG path data lexer

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Command(char),
    Number(f64),
}

/// Splits path data into command letters and numbers.
///
/// A number is an optional sign followed by digits with at most one decimal
/// point, so `1.5.5` reads as `1.5` then `.5`. Everything that is neither a
/// letter nor part of a number separates tokens.
pub fn tokenize(data: &str) -> Vec<Token> {
    let bytes = data.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_alphabetic() {
            tokens.push(Token::Command(b as char));
            i += 1;
        } else if starts_number(bytes, i) {
            let (value, len) = read_number(bytes, i);
            tokens.push(Token::Number(value));
            i += len;
        } else {
            // Separators, and the trailing bytes of any non-ASCII character
            i += 1;
        }
    }

    tokens
}

fn starts_number(bytes: &[u8], i: usize) -> bool {
    match bytes[i] {
        b'0'..=b'9' | b'.' => true,
        b'+' | b'-' => matches!(bytes.get(i + 1), Some(b'0'..=b'9') | Some(b'.')),
        _ => false,
    }
}

fn read_number(bytes: &[u8], start: usize) -> (f64, usize) {
    let mut i = start;
    if bytes[i] == b'+' || bytes[i] == b'-' {
        i += 1;
    }

    let mut seen_dot = false;
    let mut seen_digit = false;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        i += 1;
    }

    let value = if seen_digit {
        // Only ASCII was consumed, the slice is valid UTF-8.
        std::str::from_utf8(&bytes[start..i])
            .ok()
            .and_then(|text| text.parse::<f64>().ok())
            .unwrap_or(f64::NAN)
    } else {
        f64::NAN
    };

    (value, i - start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Token::*;

    #[test]
    fn test_commands_and_numbers() {
        assert_eq!(
            tokenize("M54.5,15.25c1.12,0.62"),
            vec![Command('M'), Number(54.5), Number(15.25), Command('c'), Number(1.12), Number(0.62)]
        );
    }

    #[test]
    fn test_sign_splits_numbers() {
        assert_eq!(
            tokenize("c0-0.02,51.71-0.02"),
            vec![Command('c'), Number(0.0), Number(-0.02), Number(51.71), Number(-0.02)]
        );
    }

    #[test]
    fn test_second_dot_starts_new_number() {
        assert_eq!(tokenize("L1.5.5"), vec![Command('L'), Number(1.5), Number(0.5)]);
    }

    #[test]
    fn test_whitespace_separators() {
        assert_eq!(
            tokenize(" M 1 2\n\tL+3 , 4 "),
            vec![Command('M'), Number(1.0), Number(2.0), Command('L'), Number(3.0), Number(4.0)]
        );
    }

    #[test]
    fn test_lone_sign_is_separator() {
        assert_eq!(tokenize("L - 3"), vec![Command('L'), Number(3.0)]);
    }

    #[test]
    fn test_lone_dot_is_nan() {
        let tokens = tokenize("H.");
        assert_eq!(tokens.len(), 2);
        match tokens[1] {
            Number(n) => assert!(n.is_nan()),
            other => panic!("unexpected token {:?}", other),
        }
    }

    #[test]
    fn test_empty() {
        assert!(tokenize("").is_empty());
    }
}
