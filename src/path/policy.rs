use std::fmt;

/// How parsing reacts to data outside the supported subset.
///
/// `Lenient` reproduces what browsers tolerate in KanjiVG data: unknown
/// commands are skipped, short argument lists turn into NaN coordinates and
/// unindexed strokes sort first. `Strict` turns each of those into an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePolicy {
    Lenient,
    Strict,
}

impl Default for ParsePolicy {
    fn default() -> Self {
        ParsePolicy::Lenient
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    UnknownCommand(char),
    MissingArguments { command: char, expected: usize, found: usize },
    UnexpectedArguments { command: char, expected: usize, found: usize },
    StrayNumber(f64),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::UnknownCommand(c) => write!(f, "unsupported path command '{}'", c),
            PathError::MissingArguments { command, expected, found } => write!(
                f,
                "path command '{}' expects {} arguments, found {}",
                command, expected, found
            ),
            PathError::UnexpectedArguments { command, expected, found } => write!(
                f,
                "path command '{}' takes {} arguments, found {}",
                command, expected, found
            ),
            PathError::StrayNumber(n) => write!(f, "number {} appears before any command", n),
        }
    }
}

impl std::error::Error for PathError {}

impl ParsePolicy {
    pub fn is_strict(self) -> bool {
        self == ParsePolicy::Strict
    }

    pub fn unknown_command(self, command: char) -> Result<(), PathError> {
        match self {
            ParsePolicy::Lenient => Ok(()),
            ParsePolicy::Strict => Err(PathError::UnknownCommand(command)),
        }
    }

    pub fn stray_number(self, value: f64) -> Result<(), PathError> {
        match self {
            ParsePolicy::Lenient => Ok(()),
            ParsePolicy::Strict => Err(PathError::StrayNumber(value)),
        }
    }

    /// Pads or checks `args` so that exactly `arity` values can be read.
    pub fn fit_arguments(
        self,
        command: char,
        args: &[f64],
        arity: usize,
    ) -> Result<Vec<f64>, PathError> {
        if args.len() < arity {
            if self.is_strict() {
                return Err(PathError::MissingArguments {
                    command,
                    expected: arity,
                    found: args.len(),
                });
            }
            let mut padded = args.to_vec();
            padded.resize(arity, f64::NAN);
            return Ok(padded);
        }
        if args.len() > arity && self.is_strict() {
            return Err(PathError::UnexpectedArguments {
                command,
                expected: arity,
                found: args.len(),
            });
        }
        Ok(args[..arity].to_vec())
    }

    /// Stroke index embedded in an element id, `None` when the id carries none.
    pub fn stroke_index(self, parsed: Option<u32>) -> Option<u32> {
        match (self, parsed) {
            (_, Some(index)) => Some(index),
            (ParsePolicy::Lenient, None) => Some(0),
            (ParsePolicy::Strict, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_pads_with_nan() {
        let args = ParsePolicy::Lenient.fit_arguments('L', &[1.0], 2).unwrap();
        assert_eq!(args[0], 1.0);
        assert!(args[1].is_nan());
    }

    #[test]
    fn test_lenient_drops_surplus() {
        let args = ParsePolicy::Lenient
            .fit_arguments('H', &[1.0, 2.0, 3.0], 1)
            .unwrap();
        assert_eq!(args, vec![1.0]);
    }

    #[test]
    fn test_strict_rejects_bad_arity() {
        assert_eq!(
            ParsePolicy::Strict.fit_arguments('Q', &[1.0, 2.0], 4),
            Err(PathError::MissingArguments { command: 'Q', expected: 4, found: 2 })
        );
        assert_eq!(
            ParsePolicy::Strict.fit_arguments('V', &[1.0, 2.0], 1),
            Err(PathError::UnexpectedArguments { command: 'V', expected: 1, found: 2 })
        );
    }

    #[test]
    fn test_default_is_lenient() {
        assert_eq!(ParsePolicy::default(), ParsePolicy::Lenient);
    }

    #[test]
    fn test_stroke_index_default() {
        assert_eq!(ParsePolicy::Lenient.stroke_index(None), Some(0));
        assert_eq!(ParsePolicy::Strict.stroke_index(None), None);
        assert_eq!(ParsePolicy::Strict.stroke_index(Some(4)), Some(4));
    }
}
