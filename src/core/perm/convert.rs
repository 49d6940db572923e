//! Translation between the octal, symbolic and binary forms of a permission.

use std::str::FromStr;

use serde::Serialize;

use super::model::{PermissionSet, Subject, EXECUTE, READ, WRITE};
use crate::error::{Error, Result};

const SYMBOLIC_CHARS: &[char] = &['r', 'w', 'x', 's', 'S', 't', 'T', '-'];
const SYMBOLIC_LEN: usize = 9;
const MAX_OCTAL_DIGITS: usize = 4;

/// Encoding of an input value as guessed by [`detect_format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionFormat {
    Octal,
    Symbolic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    Symbolic,
    Octal,
    Binary,
}

impl OutputTarget {
    pub const ALL: [OutputTarget; 3] = [
        OutputTarget::Symbolic,
        OutputTarget::Octal,
        OutputTarget::Binary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputTarget::Symbolic => "symbolic",
            OutputTarget::Octal => "octal",
            OutputTarget::Binary => "binary",
        }
    }
}

impl FromStr for OutputTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OutputTarget::ALL
            .iter()
            .copied()
            .find(|target| target.as_str() == s)
            .ok_or_else(|| {
                Error::unknown_target(
                    s,
                    OutputTarget::ALL
                        .iter()
                        .map(|t| t.as_str().to_string())
                        .collect(),
                )
            })
    }
}

/// Result of [`convert`]: what came in, how it was read, and what it became.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub input: String,
    pub from: PermissionFormat,
    pub to: OutputTarget,
    pub result: String,
}

/// Guess whether a value is symbolic or octal.
///
/// Nine characters drawn only from `rwxsStT-` is symbolic; everything else is
/// handed to the octal parser, which does the real validation. This is a
/// heuristic over ambiguous input, not a grammar.
pub fn detect_format(value: &str) -> PermissionFormat {
    if value.chars().count() == SYMBOLIC_LEN && value.chars().all(|c| SYMBOLIC_CHARS.contains(&c))
    {
        PermissionFormat::Symbolic
    } else {
        PermissionFormat::Octal
    }
}

/// Parse `755`, `0644`, `4755` and friends. Leading zeros are ignored; at
/// most four significant digits may remain, the fourth being the special bits.
/// Nothing left after stripping (including `""`) is mode 000.
pub fn parse_octal(value: &str) -> Result<PermissionSet> {
    let digits = value.trim_start_matches('0');

    if let Some(c) = digits.chars().find(|c| !('0'..='7').contains(c)) {
        let problem = if c.is_ascii_digit() {
            format!("octal digits must be between 0 and 7, found '{}'", c)
        } else {
            format!("'{}' is not an octal digit", c)
        };
        return Err(Error::invalid_permission(value, problem));
    }

    if digits.len() > MAX_OCTAL_DIGITS {
        return Err(Error::invalid_permission(
            value,
            format!(
                "expected 3 or 4 octal digits, found {} significant digits",
                digits.len()
            ),
        ));
    }

    if digits.is_empty() {
        return Ok(PermissionSet::from_mode(0));
    }

    let mode = u32::from_str_radix(digits, 8)
        .map_err(|e| Error::invalid_permission(value, e.to_string()))?;

    Ok(PermissionSet::from_mode(mode))
}

/// Parse a nine-character `rwxr-xr-x` string.
///
/// `x`, `s` and `t` set the execute bit; `S` and `T` record only the special
/// bit. Owner `s`/`S` means setuid, group `s`/`S` setgid, other `t`/`T`
/// sticky. Anywhere else those letters just mean execute.
pub fn parse_symbolic(value: &str) -> Result<PermissionSet> {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() != SYMBOLIC_LEN {
        return Err(Error::invalid_permission(
            value,
            format!(
                "symbolic permission must be exactly 9 characters, got {}",
                chars.len()
            ),
        ));
    }

    let mut mode: u32 = 0;
    let mut special: u8 = 0;

    for (subject, triplet) in Subject::ALL.iter().zip(chars.chunks(3)) {
        let mut digit: u8 = 0;

        match triplet[0] {
            'r' => digit |= READ,
            '-' => {}
            c => {
                return Err(Error::invalid_permission(
                    value,
                    format!("invalid read permission '{}'", c),
                ))
            }
        }

        match triplet[1] {
            'w' => digit |= WRITE,
            '-' => {}
            c => {
                return Err(Error::invalid_permission(
                    value,
                    format!("invalid write permission '{}'", c),
                ))
            }
        }

        let exec = triplet[2];
        match exec {
            'x' | 's' | 't' => digit |= EXECUTE,
            'S' | 'T' | '-' => {}
            c => {
                return Err(Error::invalid_permission(
                    value,
                    format!("invalid execute permission '{}'", c),
                ))
            }
        }

        let marks_special = match subject {
            Subject::Owner | Subject::Group => matches!(exec, 's' | 'S'),
            Subject::Other => matches!(exec, 't' | 'T'),
        };
        if marks_special {
            special |= subject.special_bit();
        }

        mode = (mode << 3) | u32::from(digit);
    }

    Ok(PermissionSet::from_mode((u32::from(special) << 9) | mode))
}

pub fn octal_to_symbolic(value: &str) -> Result<String> {
    Ok(parse_octal(value)?.symbolic())
}

pub fn symbolic_to_octal(value: &str) -> Result<String> {
    Ok(parse_symbolic(value)?.octal())
}

pub fn octal_to_binary(value: &str) -> Result<String> {
    Ok(binary_breakdown(&parse_octal(value)?))
}

/// One labelled 3-bit line per digit. The `Special` line only appears when a
/// special bit is set.
pub fn binary_breakdown(perms: &PermissionSet) -> String {
    let mut lines = Vec::with_capacity(4);

    if perms.special() > 0 {
        lines.push(format!("Special: {:03b}", perms.special()));
    }

    for subject in Subject::ALL {
        lines.push(format!("{}: {:03b}", subject.label(), perms.digit(subject)));
    }

    lines.join("\n")
}

/// Convert `value` to `target`, or to the other of octal/symbolic when no
/// target is given. Binary is never picked implicitly.
pub fn convert(value: &str, target: Option<OutputTarget>) -> Result<Conversion> {
    let from = detect_format(value);
    let to = target.unwrap_or(match from {
        PermissionFormat::Octal => OutputTarget::Symbolic,
        PermissionFormat::Symbolic => OutputTarget::Octal,
    });

    let result = match to {
        OutputTarget::Symbolic => octal_to_symbolic(value)?,
        OutputTarget::Octal => symbolic_to_octal(value)?,
        OutputTarget::Binary => match from {
            PermissionFormat::Symbolic => binary_breakdown(&parse_symbolic(value)?),
            PermissionFormat::Octal => octal_to_binary(value)?,
        },
    };

    Ok(Conversion {
        input: value.to_string(),
        from,
        to,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn assert_invalid(result: Result<String>) {
        let err = result.unwrap_err();
        assert_eq!(err.code, ErrorCode::PermInvalidPermission);
    }

    #[test]
    fn octal_to_symbolic_known_values() {
        let cases = [
            ("755", "rwxr-xr-x"),
            ("644", "rw-r--r--"),
            ("777", "rwxrwxrwx"),
            ("000", "---------"),
            ("4755", "rwsr-xr-x"),
            ("2755", "rwxr-sr-x"),
            ("1777", "rwxrwxrwt"),
            ("4644", "rwSr--r--"),
            ("1666", "rw-rw-rwT"),
            ("7000", "--S--S--T"),
        ];

        for (octal, symbolic) in cases {
            assert_eq!(octal_to_symbolic(octal).unwrap(), symbolic, "octal {}", octal);
        }
    }

    #[test]
    fn octal_strips_leading_zeros() {
        assert_eq!(octal_to_symbolic("0755").unwrap(), "rwxr-xr-x");
        assert_eq!(octal_to_symbolic("000644").unwrap(), "rw-r--r--");
        assert_eq!(octal_to_symbolic("0").unwrap(), "---------");
        assert_eq!(octal_to_symbolic("44").unwrap(), "---r--r--");
    }

    #[test]
    fn symbolic_to_octal_known_values() {
        let cases = [
            ("rwxr-xr-x", "755"),
            ("rw-r--r--", "644"),
            ("rw-------", "600"),
            ("rwsr-xr-x", "4755"),
            ("rwxr-sr-x", "2755"),
            ("rwxrwxrwt", "1777"),
            ("rwSr--r--", "4644"),
            ("rw-rw-rwT", "1666"),
        ];

        for (symbolic, octal) in cases {
            assert_eq!(symbolic_to_octal(symbolic).unwrap(), octal, "symbolic {}", symbolic);
        }
    }

    #[test]
    fn misplaced_special_letters_only_set_execute() {
        assert_eq!(symbolic_to_octal("rwtr-xr-x").unwrap(), "755");
        assert_eq!(symbolic_to_octal("rwxr-xr-s").unwrap(), "755");
        assert_eq!(symbolic_to_octal("rwTr-xr-x").unwrap(), "655");
    }

    #[test]
    fn round_trip_every_plain_mode() {
        for mode in 0..=0o777u32 {
            let octal = format!("{:03o}", mode);
            let symbolic = octal_to_symbolic(&octal).unwrap();
            assert_eq!(symbolic.len(), 9);
            assert_eq!(symbolic_to_octal(&symbolic).unwrap(), octal);
        }
    }

    #[test]
    fn round_trip_every_special_mode() {
        for special in 1..=7u32 {
            for mode in 0..=0o777u32 {
                let octal = format!("{}{:03o}", special, mode);
                let symbolic = octal_to_symbolic(&octal).unwrap();
                assert_eq!(symbolic_to_octal(&symbolic).unwrap(), octal);
            }
        }
    }

    #[test]
    fn conversion_is_deterministic() {
        assert_eq!(octal_to_symbolic("4750").unwrap(), octal_to_symbolic("4750").unwrap());
        assert_eq!(
            symbolic_to_octal("rwsr-x---").unwrap(),
            symbolic_to_octal("rwsr-x---").unwrap()
        );
    }

    #[test]
    fn octal_rejects_out_of_range_digits() {
        assert_invalid(octal_to_symbolic("888"));
        assert_invalid(octal_to_symbolic("999"));
        assert_invalid(octal_to_symbolic("8755"));
    }

    #[test]
    fn octal_rejects_too_many_digits() {
        assert_invalid(octal_to_symbolic("12345"));
        assert_invalid(octal_to_symbolic("77777"));
    }

    #[test]
    fn octal_rejects_non_digits() {
        assert_invalid(octal_to_symbolic("75a"));
        assert_invalid(octal_to_symbolic("-755"));
    }

    #[test]
    fn empty_octal_is_mode_zero() {
        assert_eq!(octal_to_symbolic("").unwrap(), "---------");
        assert_eq!(
            octal_to_binary("").unwrap(),
            "Owner: 000\nGroup: 000\nOther: 000"
        );

        let conversion = convert("", None).unwrap();
        assert_eq!(conversion.from, PermissionFormat::Octal);
        assert_eq!(conversion.result, "---------");
    }

    #[test]
    fn octal_error_names_offending_digit() {
        let err = octal_to_symbolic("788").unwrap_err();
        assert!(err.message.contains("788"));
        assert!(err.message.contains("'8'"));
    }

    #[test]
    fn symbolic_rejects_wrong_length() {
        assert_invalid(symbolic_to_octal("rwxrwxrw"));
        assert_invalid(symbolic_to_octal("rwxrwxrwxr"));
        assert_invalid(symbolic_to_octal(""));
    }

    #[test]
    fn symbolic_rejects_foreign_characters_in_every_position() {
        for pos in 0..9 {
            let mut chars: Vec<char> = "rwxrwxrwx".chars().collect();
            chars[pos] = 'a';
            let value: String = chars.into_iter().collect();
            let err = symbolic_to_octal(&value).unwrap_err();
            assert_eq!(err.code, ErrorCode::PermInvalidPermission);
            assert!(err.message.contains("'a'"), "position {}: {}", pos, err.message);
        }
    }

    #[test]
    fn symbolic_rejects_letters_in_wrong_column() {
        assert_invalid(symbolic_to_octal("wrxr-xr-x"));
        assert_invalid(symbolic_to_octal("r-xrx-r-x"));
        assert_invalid(symbolic_to_octal("rwrr-xr-x"));
    }

    #[test]
    fn detect_format_classifies_inputs() {
        assert_eq!(detect_format("rwxr-xr-x"), PermissionFormat::Symbolic);
        assert_eq!(detect_format("rwSr--r-T"), PermissionFormat::Symbolic);
        assert_eq!(detect_format("755"), PermissionFormat::Octal);
        assert_eq!(detect_format("rwxrwxrw"), PermissionFormat::Octal);
        assert_eq!(detect_format("rwxrwxabc"), PermissionFormat::Octal);
    }

    #[test]
    fn binary_breakdown_lines() {
        assert_eq!(
            octal_to_binary("755").unwrap(),
            "Owner: 111\nGroup: 101\nOther: 101"
        );
        assert_eq!(
            octal_to_binary("4644").unwrap(),
            "Special: 100\nOwner: 110\nGroup: 100\nOther: 100"
        );
        assert_eq!(
            octal_to_binary("0644").unwrap(),
            "Owner: 110\nGroup: 100\nOther: 100"
        );
    }

    #[test]
    fn binary_rejects_invalid_octal() {
        assert_invalid(octal_to_binary("888"));
    }

    #[test]
    fn convert_defaults_to_opposite_form() {
        let conversion = convert("755", None).unwrap();
        assert_eq!(conversion.from, PermissionFormat::Octal);
        assert_eq!(conversion.to, OutputTarget::Symbolic);
        assert_eq!(conversion.result, "rwxr-xr-x");

        let conversion = convert("rwsr-xr-x", None).unwrap();
        assert_eq!(conversion.from, PermissionFormat::Symbolic);
        assert_eq!(conversion.to, OutputTarget::Octal);
        assert_eq!(conversion.result, "4755");
    }

    #[test]
    fn convert_to_binary_accepts_symbolic_input() {
        let conversion = convert("rwxr-sr-x", Some(OutputTarget::Binary)).unwrap();
        assert_eq!(
            conversion.result,
            "Special: 010\nOwner: 111\nGroup: 101\nOther: 101"
        );
    }

    #[test]
    fn convert_with_explicit_target_uses_that_direction() {
        assert_eq!(
            convert("644", Some(OutputTarget::Symbolic)).unwrap().result,
            "rw-r--r--"
        );
        assert!(convert("644", Some(OutputTarget::Octal)).is_err());
        assert!(convert("rwxr-xr-x", Some(OutputTarget::Symbolic)).is_err());
    }

    #[test]
    fn output_target_from_str() {
        assert_eq!("binary".parse::<OutputTarget>().unwrap(), OutputTarget::Binary);
        let err = "hex".parse::<OutputTarget>().unwrap_err();
        assert_eq!(err.code, ErrorCode::PermUnknownTarget);
    }
}
