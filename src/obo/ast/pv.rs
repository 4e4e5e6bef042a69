//! Property values
//!
//! A property value is either a resource pair (`relation target`) or a
//! typed literal (`relation "value" datatype`).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::obo::ast::ident::Ident;
use crate::obo::error::SyntaxError;
use crate::obo::lexing;

/// The payload of a `property_value` / `property-value` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PropertyValue {
    /// A relation to another entity.
    Resource { relation: Ident, target: Ident },
    /// A relation to a typed literal value.
    Literal {
        relation: Ident,
        value: String,
        datatype: Ident,
    },
}

impl PropertyValue {
    pub fn relation(&self) -> &Ident {
        match self {
            PropertyValue::Resource { relation, .. } => relation,
            PropertyValue::Literal { relation, .. } => relation,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Resource { relation, target } => write!(f, "{} {}", relation, target),
            PropertyValue::Literal {
                relation,
                value,
                datatype,
            } => write!(
                f,
                "{} \"{}\" {}",
                relation,
                lexing::escaped(value, lexing::QUOTED_SPECIALS),
                datatype
            ),
        }
    }
}

impl FromStr for PropertyValue {
    type Err = SyntaxError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let (raw_relation, rest) = lexing::split_field(text);
        let relation: Ident = raw_relation.parse().map_err(|e| {
            SyntaxError::new(format!(
                "invalid property value relation {:?}: {}",
                raw_relation, e
            ))
        })?;
        if rest.starts_with('"') {
            let (value, rest) = lexing::parse_quoted(rest)?;
            let (raw_datatype, trailing) = lexing::split_field(rest);
            let datatype: Ident = raw_datatype.parse().map_err(|e| {
                SyntaxError::new(format!(
                    "invalid property value datatype {:?}: {}",
                    raw_datatype, e
                ))
            })?;
            if !trailing.is_empty() {
                return Err(SyntaxError::new(format!(
                    "unexpected text after property value: {:?}",
                    trailing
                )));
            }
            Ok(PropertyValue::Literal {
                relation,
                value,
                datatype,
            })
        } else {
            let (raw_target, trailing) = lexing::split_field(rest);
            if !trailing.is_empty() {
                return Err(SyntaxError::new(format!(
                    "unexpected text after property value: {:?}",
                    trailing
                )));
            }
            let target: Ident = raw_target.parse().map_err(|e| {
                SyntaxError::new(format!(
                    "invalid property value target {:?}: {}",
                    raw_target, e
                ))
            })?;
            Ok(PropertyValue::Resource { relation, target })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_round_trip() {
        let pv: PropertyValue = "IAO:0000117 TST:001".parse().expect("parse failed");
        assert!(matches!(pv, PropertyValue::Resource { .. }));
        assert_eq!(pv.to_string(), "IAO:0000117 TST:001");
    }

    #[test]
    fn test_literal_round_trip() {
        let pv: PropertyValue = r#"seeAlso "consider this" xsd:string"#
            .parse()
            .expect("parse failed");
        match &pv {
            PropertyValue::Literal {
                value, datatype, ..
            } => {
                assert_eq!(value, "consider this");
                assert_eq!(datatype.to_string(), "xsd:string");
            }
            other => panic!("expected literal, got {:?}", other),
        }
        assert_eq!(pv.to_string(), r#"seeAlso "consider this" xsd:string"#);
    }

    #[test]
    fn test_missing_target_is_rejected() {
        assert!("IAO:0000117".parse::<PropertyValue>().is_err());
        assert!(r#"seeAlso "value only""#.parse::<PropertyValue>().is_err());
    }
}
