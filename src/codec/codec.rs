//! Encode and decode between raw external values and typed slots
//!
//! Write path: `encode` maps one submitted raw string (or its absence)
//! to the slot the owning attribute's declared type demands, or rejects
//! it. Read path: `decode` hands back the stored slot after checking it
//! is the one the declared type demands.
//!
//! There is no inference and no precedence between slots: the declared
//! type alone decides, so stored `0`, `""` and `false` survive a
//! round trip unchanged.

use chrono::NaiveDate;

use crate::schema::{Attribute, DataType};

use super::errors::{CodecError, CodecResult};
use super::value::{TypedValue, DATE_FORMAT};

/// Encodes a submitted raw value against the attribute's declared type.
///
/// `raw = None` means the field was not submitted at all: required
/// attributes reject that with `MissingRequiredValue`, optional ones
/// store nothing. The empty string is a *submitted* value (untouched
/// form inputs deliver it) and goes through encoding like any other.
pub fn encode(attribute: &Attribute, raw: Option<&str>) -> CodecResult<Option<TypedValue>> {
    let raw = match raw {
        Some(raw) => raw,
        None if attribute.is_required => {
            return Err(CodecError::MissingRequiredValue(attribute.name.clone()));
        }
        None => return Ok(None),
    };

    let value = match attribute.data_type {
        DataType::Text => TypedValue::Text(raw.to_string()),
        DataType::Integer => TypedValue::Integer(parse_number(attribute.data_type, raw)?),
        DataType::Decimal => TypedValue::Decimal(parse_decimal(raw)?),
        // Checkbox semantics: the token "true" in any ASCII case is true,
        // every other input is false. Never a parse failure.
        DataType::Boolean => TypedValue::Boolean(raw.eq_ignore_ascii_case("true")),
        DataType::Date => TypedValue::Date(parse_date(raw)?),
        DataType::Enum => {
            if !attribute.has_option(raw) {
                return Err(CodecError::InvalidEnumValue {
                    value: raw.to_string(),
                });
            }
            TypedValue::Text(raw.to_string())
        }
    };
    Ok(Some(value))
}

/// Decodes a stored value by the attribute's declared type.
///
/// The declared type names exactly one slot and the stored variant must
/// occupy it. A disagreement cannot arise through this crate's own
/// writes (types are fixed once declared) and is surfaced as
/// `TypeMismatch`, never reinterpreted.
pub fn decode<'a>(attribute: &Attribute, stored: &'a TypedValue) -> CodecResult<&'a TypedValue> {
    if attribute.data_type.slot_name() == stored.slot_name() {
        Ok(stored)
    } else {
        Err(CodecError::TypeMismatch {
            expected: attribute.data_type,
            value: stored.render(),
        })
    }
}

fn parse_number<T: std::str::FromStr>(expected: DataType, raw: &str) -> CodecResult<T> {
    raw.parse().map_err(|_| CodecError::TypeMismatch {
        expected,
        value: raw.to_string(),
    })
}

fn parse_decimal(raw: &str) -> CodecResult<f64> {
    let value: f64 = parse_number(DataType::Decimal, raw)?;
    // JSON has no encoding for NaN or infinity; a non-finite parse is a
    // mismatch, not a value.
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CodecError::TypeMismatch {
            expected: DataType::Decimal,
            value: raw.to_string(),
        })
    }
}

fn parse_date(raw: &str) -> CodecResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| CodecError::TypeMismatch {
        expected: DataType::Date,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::schema::types::split_options;

    use super::*;

    fn attribute(data_type: DataType) -> Attribute {
        Attribute {
            id: 1,
            category_id: 1,
            name: "UnderTest".into(),
            data_type,
            options: Vec::new(),
            is_required: false,
        }
    }

    fn enum_attribute(options: &str) -> Attribute {
        Attribute {
            options: split_options(options),
            ..attribute(DataType::Enum)
        }
    }

    fn required(attribute: Attribute) -> Attribute {
        Attribute { is_required: true, ..attribute }
    }

    #[test]
    fn test_text_stored_verbatim() {
        let attr = attribute(DataType::Text);
        let value = encode(&attr, Some("  Android 15 ")).unwrap();
        assert_eq!(value, Some(TypedValue::Text("  Android 15 ".into())));
    }

    #[test]
    fn test_integer_parses_base_ten() {
        let attr = attribute(DataType::Integer);
        assert_eq!(encode(&attr, Some("64")).unwrap(), Some(TypedValue::Integer(64)));
        assert_eq!(encode(&attr, Some("-7")).unwrap(), Some(TypedValue::Integer(-7)));

        for bad in ["abc", "6.1", "", "0x10"] {
            let result = encode(&attr, Some(bad));
            assert!(
                matches!(result, Err(CodecError::TypeMismatch { expected: DataType::Integer, .. })),
                "expected mismatch for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_decimal_parses_float() {
        let attr = attribute(DataType::Decimal);
        assert_eq!(encode(&attr, Some("6.1")).unwrap(), Some(TypedValue::Decimal(6.1)));
        assert_eq!(encode(&attr, Some("0")).unwrap(), Some(TypedValue::Decimal(0.0)));

        let result = encode(&attr, Some("heavy"));
        assert!(matches!(
            result,
            Err(CodecError::TypeMismatch { expected: DataType::Decimal, .. })
        ));
    }

    #[test]
    fn test_decimal_rejects_non_finite() {
        let attr = attribute(DataType::Decimal);
        for bad in ["inf", "-inf", "infinity", "NaN", "nan", "1e5000"] {
            let result = encode(&attr, Some(bad));
            assert!(
                matches!(result, Err(CodecError::TypeMismatch { expected: DataType::Decimal, .. })),
                "expected mismatch for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_boolean_accepts_true_token_any_case() {
        let attr = attribute(DataType::Boolean);
        for token in ["true", "TRUE", "True", "tRuE"] {
            assert_eq!(
                encode(&attr, Some(token)).unwrap(),
                Some(TypedValue::Boolean(true))
            );
        }
    }

    #[test]
    fn test_boolean_everything_else_is_false() {
        let attr = attribute(DataType::Boolean);
        for token in ["false", "yes", "1", "on", ""] {
            assert_eq!(
                encode(&attr, Some(token)).unwrap(),
                Some(TypedValue::Boolean(false)),
                "token {:?} must encode as false",
                token
            );
        }
    }

    #[test]
    fn test_date_requires_iso_pattern() {
        let attr = attribute(DataType::Date);
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(
            encode(&attr, Some("2024-01-15")).unwrap(),
            Some(TypedValue::Date(expected))
        );

        for bad in ["15/01/2024", "2024-13-01", "2024-02-30", "yesterday", ""] {
            let result = encode(&attr, Some(bad));
            assert!(
                matches!(result, Err(CodecError::TypeMismatch { expected: DataType::Date, .. })),
                "expected mismatch for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_enum_membership_is_byte_exact() {
        let attr = enum_attribute("64GB,128GB,256GB");
        assert_eq!(
            encode(&attr, Some("128GB")).unwrap(),
            Some(TypedValue::Text("128GB".into()))
        );

        for bad in ["512GB", "128gb", " 128GB", ""] {
            let result = encode(&attr, Some(bad));
            assert!(
                matches!(result, Err(CodecError::InvalidEnumValue { .. })),
                "expected rejection for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_enum_lands_in_text_slot() {
        let attr = enum_attribute("S,M,L");
        let value = encode(&attr, Some("M")).unwrap().unwrap();
        assert_eq!(value.slot_name(), "text");
    }

    #[test]
    fn test_absent_value_optional_stores_nothing() {
        for data_type in [
            DataType::Text,
            DataType::Integer,
            DataType::Decimal,
            DataType::Boolean,
            DataType::Date,
        ] {
            assert_eq!(encode(&attribute(data_type), None).unwrap(), None);
        }
    }

    #[test]
    fn test_absent_value_required_rejected() {
        let attr = required(attribute(DataType::Boolean));
        let result = encode(&attr, None);
        assert_eq!(
            result,
            Err(CodecError::MissingRequiredValue("UnderTest".into()))
        );
    }

    #[test]
    fn test_empty_string_counts_as_submitted() {
        // A required text attribute is satisfied by an untouched form input
        let attr = required(attribute(DataType::Text));
        assert_eq!(
            encode(&attr, Some("")).unwrap(),
            Some(TypedValue::Text(String::new()))
        );
    }

    #[test]
    fn test_decode_returns_matching_slot() {
        let attr = attribute(DataType::Integer);
        let stored = TypedValue::Integer(42);
        assert_eq!(decode(&attr, &stored).unwrap(), &stored);
    }

    #[test]
    fn test_falsy_values_round_trip() {
        let cases = [
            (attribute(DataType::Text), Some(""), TypedValue::Text(String::new())),
            (attribute(DataType::Integer), Some("0"), TypedValue::Integer(0)),
            (attribute(DataType::Decimal), Some("0"), TypedValue::Decimal(0.0)),
            (attribute(DataType::Boolean), Some("no"), TypedValue::Boolean(false)),
        ];
        for (attr, raw, expected) in cases {
            let stored = encode(&attr, raw).unwrap().unwrap();
            assert_eq!(stored, expected);
            assert_eq!(decode(&attr, &stored).unwrap(), &expected);
        }
    }

    #[test]
    fn test_decode_accepts_exactly_the_declared_slot() {
        let samples = [
            TypedValue::Text("x".into()),
            TypedValue::Integer(1),
            TypedValue::Decimal(1.5),
            TypedValue::Boolean(true),
            TypedValue::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
        ];

        for data_type in [
            DataType::Text,
            DataType::Integer,
            DataType::Decimal,
            DataType::Boolean,
            DataType::Date,
            DataType::Enum,
        ] {
            let attr = attribute(data_type);
            let accepted: Vec<_> = samples
                .iter()
                .filter(|stored| decode(&attr, stored).is_ok())
                .collect();
            assert_eq!(accepted.len(), 1, "type {} must accept exactly one slot", data_type);
            assert_eq!(accepted[0].slot_name(), data_type.slot_name());
        }
    }

    #[test]
    fn test_decode_rejects_slot_disagreement() {
        let attr = attribute(DataType::Date);
        let stored = TypedValue::Boolean(true);
        let result = decode(&attr, &stored);
        assert_eq!(
            result,
            Err(CodecError::TypeMismatch {
                expected: DataType::Date,
                value: "true".into(),
            })
        );
    }

    #[test]
    fn test_decode_enum_reads_text_slot() {
        let attr = enum_attribute("S,M,L");
        let stored = TypedValue::Text("M".into());
        assert_eq!(decode(&attr, &stored).unwrap(), &stored);
    }
}
