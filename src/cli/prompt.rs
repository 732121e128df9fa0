//! Interactive parameter prompts.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the prompts provide the "run `ctc` and type four numbers" UX
//!
//! Reading and parsing are split so the parse step can be tested without a
//! terminal: `parse_or_default` is the typed parse-or-default contract and
//! `prompt_parameters` only wires it to a reader/writer pair.

use std::io::{BufRead, Write};

use crate::domain::{ParamField, ParameterSet};
use crate::error::InputError;

/// Parse a prompt answer, falling back to `default` when the line is empty.
///
/// Only a line with nothing before its terminator counts as empty. Surrounding
/// whitespace is ignored around a number, but whitespace alone is rejected.
pub fn parse_or_default(field: ParamField, input: &str, default: f64) -> Result<f64, InputError> {
    let line = input.trim_end_matches(['\n', '\r']);
    if line.is_empty() {
        return Ok(default);
    }
    line.trim()
        .parse::<f64>()
        .map_err(|_| InputError::InvalidNumber {
            field: field.key().to_string(),
            input: line.to_string(),
        })
}

/// Prompt text for one field, echoing the recommended value.
pub fn prompt_text(field: ParamField, default: f64) -> String {
    format!(
        "Enter {} (recommended: {}): ",
        field.describe(),
        field.fmt_default(default)
    )
}

/// Ask for every parameter that is still `None`, in omega/rho/L/R order.
///
/// Fields already given (e.g. as CLI flags) are not prompted for. End of input
/// counts as a blank answer.
pub fn prompt_parameters<R: BufRead, W: Write>(
    given: [Option<f64>; 4],
    defaults: &ParameterSet,
    input: &mut R,
    output: &mut W,
) -> Result<ParameterSet, InputError> {
    let mut params = *defaults;
    for (field, value) in ParamField::ALL.into_iter().zip(given) {
        let value = match value {
            Some(v) => v,
            None => {
                let default = field.get(defaults);
                write!(output, "{}", prompt_text(field, default))
                    .and_then(|_| output.flush())
                    .map_err(|e| InputError::Io(format!("Failed to write prompt: {e}")))?;

                let mut line = String::new();
                input
                    .read_line(&mut line)
                    .map_err(|e| InputError::Io(format!("Failed to read input: {e}")))?;
                parse_or_default(field, &line, default)?
            }
        };
        field.set(&mut params, value);
    }
    Ok(params)
}

/// Fill omitted fields from `defaults` without prompting.
pub fn fill_defaults(given: [Option<f64>; 4], defaults: &ParameterSet) -> ParameterSet {
    let mut params = *defaults;
    for (field, value) in ParamField::ALL.into_iter().zip(given) {
        if let Some(v) = value {
            field.set(&mut params, v);
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn empty_line_uses_default() {
        assert_eq!(parse_or_default(ParamField::Rho, "", 1e17), Ok(1e17));
        assert_eq!(parse_or_default(ParamField::Rho, "\n", 1e17), Ok(1e17));
        assert_eq!(parse_or_default(ParamField::Rho, "\r\n", 1e17), Ok(1e17));
    }

    #[test]
    fn whitespace_only_is_rejected() {
        let err = parse_or_default(ParamField::Rho, "  \n", 1e17).unwrap_err();
        assert_eq!(
            err,
            InputError::InvalidNumber {
                field: "rho".to_string(),
                input: "  ".to_string()
            }
        );
        assert_eq!(parse_or_default(ParamField::Rho, " 2.5 \n", 1e17), Ok(2.5));
    }

    #[test]
    fn parses_numbers_including_exponent_and_negative() {
        assert_eq!(parse_or_default(ParamField::Omega, "2.5\n", 0.0), Ok(2.5));
        assert_eq!(parse_or_default(ParamField::Omega, "1e17", 0.0), Ok(1e17));
        assert_eq!(parse_or_default(ParamField::Radius, "-3", 0.0), Ok(-3.0));
        assert_eq!(parse_or_default(ParamField::Radius, "0", 1.0), Ok(0.0));
    }

    #[test]
    fn non_numeric_is_typed_failure() {
        let err = parse_or_default(ParamField::Length, "ten\n", 1e7).unwrap_err();
        assert_eq!(
            err,
            InputError::InvalidNumber {
                field: "L".to_string(),
                input: "ten".to_string()
            }
        );
    }

    #[test]
    fn prompt_text_echoes_default() {
        assert_eq!(
            prompt_text(ParamField::Omega, 71619724.3913529),
            "Enter angular velocity (omega) in rad/s (recommended: 71619724.3913529): "
        );
        assert_eq!(
            prompt_text(ParamField::Rho, 1e17),
            "Enter density (rho) in kg/m^3 (recommended: 1e+17): "
        );
        assert_eq!(
            prompt_text(ParamField::Radius, 1.0),
            "Enter radius (R) in meters (recommended: 1): "
        );
        assert_eq!(
            prompt_text(ParamField::Length, 1e7),
            "Enter length (L) in meters (recommended: 10000000.0): "
        );
    }

    #[test]
    fn prompts_only_missing_fields() {
        let mut input = Cursor::new("0\n\n");
        let mut output = Vec::new();
        let params = prompt_parameters(
            [None, Some(5.0), None, Some(2.0)],
            &ParameterSet::recommended(),
            &mut input,
            &mut output,
        )
        .unwrap();

        assert_eq!(params, ParameterSet::new(0.0, 5.0, 1e7, 2.0));
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("angular velocity"));
        assert!(shown.contains("length (L)"));
        assert!(!shown.contains("density"));
        assert!(!shown.contains("radius"));
    }

    #[test]
    fn eof_means_defaults() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let params = prompt_parameters(
            [None; 4],
            &ParameterSet::recommended(),
            &mut input,
            &mut output,
        )
        .unwrap();
        assert_eq!(params, ParameterSet::recommended());
    }

    #[test]
    fn bad_answer_stops_prompting() {
        let mut input = Cursor::new("1\nheavy\n3\n4\n");
        let mut output = Vec::new();
        let err = prompt_parameters(
            [None; 4],
            &ParameterSet::recommended(),
            &mut input,
            &mut output,
        )
        .unwrap_err();
        assert!(matches!(err, InputError::InvalidNumber { ref field, .. } if field == "rho"));
        let shown = String::from_utf8(output).unwrap();
        assert!(!shown.contains("length"));
    }

    #[test]
    fn fill_defaults_keeps_given() {
        let p = fill_defaults([Some(1.0), None, None, Some(0.0)], &ParameterSet::recommended());
        assert_eq!(p, ParameterSet::new(1.0, 1e17, 1e7, 0.0));
    }
}
