use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid objective '{0}'. Expected 'LABEL' or 'LABEL:MIN:MAX' (e.g., 'cost:0:250').")]
    InvalidObjectiveFormat(String),

    #[error("Invalid bound '{bound}' in objective '{spec}'. Expected a number.")]
    InvalidBound { bound: String, spec: String },

    #[error("Column label cannot be empty in objective '{0}'.")]
    EmptyLabel(String),

    #[error("Invalid delimiter '{0}'. Expected a single ASCII character.")]
    InvalidDelimiter(String),
}

/// One objective as written on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveSpec {
    pub label: String,
    pub range: Option<(f64, f64)>,
}

/// Parses `LABEL` or `LABEL:MIN:MAX`. Bounds are split off from the right, so a
/// label may itself contain colons only when both bounds are given.
pub fn parse_objective(spec: &str) -> Result<ObjectiveSpec, ParseError> {
    let parts: Vec<&str> = spec.rsplitn(3, ':').collect();
    let (label, range) = match parts.as_slice() {
        [label] => (*label, None),
        [max, min, label] => {
            let parse_bound = |bound: &str| {
                bound.trim().parse::<f64>().map_err(|_| ParseError::InvalidBound {
                    bound: bound.to_string(),
                    spec: spec.to_string(),
                })
            };
            (*label, Some((parse_bound(min)?, parse_bound(max)?)))
        }
        _ => return Err(ParseError::InvalidObjectiveFormat(spec.to_string())),
    };

    let label = label.trim();
    if label.is_empty() {
        return Err(ParseError::EmptyLabel(spec.to_string()));
    }
    Ok(ObjectiveSpec {
        label: label.to_string(),
        range,
    })
}

pub fn parse_delimiter(value: &str) -> Result<u8, ParseError> {
    match value {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(ParseError::InvalidDelimiter(value.to_string())),
        },
    }
}
