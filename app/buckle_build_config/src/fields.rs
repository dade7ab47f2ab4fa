/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use allocative::Allocative;
use buckle_node::attrs::attr_type::AttrType;
use buckle_node::attrs::coerce::ctx::CoercionContext;
use buckle_node::attrs::coerce::error::CoercionError;
use buckle_node::attrs::coerced_attr::CoercedAttr;
use buckle_node::attrs::raw::RawValue;
use derive_more::Display;
use dupe::Dupe;
use indexmap::IndexMap;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::literal;
use crate::literal::Literal;
use crate::literal::Suffix;

static JAVA_IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Java type of a `BuildConfig` field.
#[derive(Debug, Clone, Copy, Dupe, Eq, PartialEq, Hash, Display, Allocative)]
pub enum FieldType {
    #[display("boolean")]
    Boolean,
    #[display("int")]
    Int,
    #[display("long")]
    Long,
    #[display("float")]
    Float,
    #[display("double")]
    Double,
    #[display("String")]
    String,
}

impl FieldType {
    const ALL: [FieldType; 6] = [
        FieldType::Boolean,
        FieldType::Int,
        FieldType::Long,
        FieldType::Float,
        FieldType::Double,
        FieldType::String,
    ];

    /// Parses the Java spelling of the type, as in `long` or `String`.
    pub fn from_java(name: &str) -> Option<FieldType> {
        FieldType::ALL.into_iter().find(|t| t.to_string() == name)
    }

    fn attr_type(self) -> AttrType {
        match self {
            FieldType::Boolean => AttrType::bool(),
            FieldType::Int => AttrType::int(),
            FieldType::Long => AttrType::long(),
            FieldType::Float | FieldType::Double => AttrType::float(),
            FieldType::String => AttrType::string(),
        }
    }

    fn accepts_suffix(self, suffix: Suffix) -> bool {
        match suffix {
            Suffix::Long => self == FieldType::Long,
            Suffix::Float => matches!(self, FieldType::Float | FieldType::Double),
            Suffix::Double => self == FieldType::Double,
        }
    }

    /// The Java expression a field of this type holds when it is not set.
    pub(crate) fn zero(self) -> &'static str {
        match self {
            FieldType::Boolean => "false",
            FieldType::String => "null",
            FieldType::Int | FieldType::Long | FieldType::Float | FieldType::Double => "0",
        }
    }
}

/// One `public static final` field of a `BuildConfig` class.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    field_type: FieldType,
    name: String,
    value: CoercedAttr,
    /// Java source text of the value, exactly as it will be emitted.
    literal: String,
}

impl Field {
    pub fn boolean(name: &str, value: bool) -> Field {
        Field {
            field_type: FieldType::Boolean,
            name: name.to_owned(),
            value: CoercedAttr::Bool(value),
            literal: value.to_string(),
        }
    }

    pub fn int(name: &str, value: i32) -> Field {
        Field {
            field_type: FieldType::Int,
            name: name.to_owned(),
            value: CoercedAttr::Int(value),
            literal: value.to_string(),
        }
    }

    pub fn string(name: &str, value: &str) -> Field {
        Field {
            field_type: FieldType::String,
            name: name.to_owned(),
            value: CoercedAttr::String(value.into()),
            literal: literal::quote(value),
        }
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &CoercedAttr {
        &self.value
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Parses `TYPE NAME = VALUE`.
    pub fn parse(declaration: &str) -> Result<Field, DeclarationErrorReason> {
        let (lhs, rhs) = declaration
            .split_once('=')
            .ok_or(DeclarationErrorReason::MissingEquals)?;

        let (type_name, name) = lhs
            .split_whitespace()
            .collect_tuple()
            .ok_or(DeclarationErrorReason::MissingTypeOrName)?;
        let field_type = FieldType::from_java(type_name)
            .ok_or_else(|| DeclarationErrorReason::UnknownType(type_name.to_owned()))?;
        if !JAVA_IDENTIFIER_REGEX.is_match(name) {
            return Err(DeclarationErrorReason::InvalidName(name.to_owned()));
        }

        let text = rhs.trim();
        let lexed = literal::lex(text)
            .ok_or_else(|| DeclarationErrorReason::MalformedLiteral(text.to_owned()))?;
        if let Some(suffix) = lexed.suffix {
            if !field_type.accepts_suffix(suffix) {
                return Err(DeclarationErrorReason::SuffixMismatch { suffix, field_type });
            }
        }
        check_assignable(field_type, text, &lexed)?;

        let ctx = CoercionContext::no_target();
        let value = field_type
            .attr_type()
            .coerce(&ctx.field(name), &lexed.value)
            .map_err(DeclarationErrorReason::Coercion)?;

        Ok(Field {
            field_type,
            name: name.to_owned(),
            value,
            literal: text.to_owned(),
        })
    }
}

/// Rejects literals `javac` would not accept for a field of `field_type`,
/// even though their value fits.
fn check_assignable(
    field_type: FieldType,
    text: &str,
    lexed: &Literal,
) -> Result<(), DeclarationErrorReason> {
    match (&lexed.value, lexed.suffix, field_type) {
        (RawValue::Int(i), None, FieldType::Long | FieldType::Float | FieldType::Double)
            if i32::try_from(*i).is_err() =>
        {
            Err(DeclarationErrorReason::IntegerTooLarge(text.to_owned()))
        }
        (RawValue::Float(_), None, FieldType::Float) => {
            Err(DeclarationErrorReason::DoubleToFloat(text.to_owned()))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum DeclarationErrorReason {
    #[error("expected `TYPE NAME = VALUE`")]
    MissingEquals,
    #[error("expected exactly `TYPE NAME` before `=`")]
    MissingTypeOrName,
    #[error(
        "unsupported type `{0}`, expected one of {all}",
        all = FieldType::ALL.iter().join(", ")
    )]
    UnknownType(String),
    #[error("`{0}` is not a valid Java identifier")]
    InvalidName(String),
    #[error("`{0}` is not a boolean, number or string literal")]
    MalformedLiteral(String),
    #[error("literal suffix `{suffix}` cannot be used with type `{field_type}`")]
    SuffixMismatch { suffix: Suffix, field_type: FieldType },
    #[error("integer literal `{0}` is out of the 32-bit range, it needs an `L` suffix")]
    IntegerTooLarge(String),
    #[error("`{0}` is a double literal, `float` needs an `F` suffix")]
    DoubleToFloat(String),
    #[error(transparent)]
    Coercion(CoercionError),
}

/// A field declaration that could not be parsed. `line` is 1-based.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Invalid build config field on line {line} `{text}`: {reason}")]
pub struct DeclarationError {
    pub line: usize,
    pub text: String,
    pub reason: DeclarationErrorReason,
}

/// Ordered set of `BuildConfig` fields, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildConfigFields {
    fields: IndexMap<String, Field>,
}

impl BuildConfigFields {
    pub fn new() -> BuildConfigFields {
        BuildConfigFields::default()
    }

    /// Parses one `TYPE NAME = VALUE` declaration per line. A field declared
    /// twice takes the later value.
    pub fn from_field_declarations<'a>(
        lines: impl IntoIterator<Item = &'a str>,
    ) -> Result<BuildConfigFields, DeclarationError> {
        let mut fields = BuildConfigFields::new();
        for (i, text) in lines.into_iter().enumerate() {
            let field = Field::parse(text).map_err(|reason| DeclarationError {
                line: i + 1,
                text: text.to_owned(),
                reason,
            })?;
            fields.put(field);
        }
        Ok(fields)
    }

    /// Fields every `BuildConfig` has unless declared otherwise.
    pub fn defaults() -> BuildConfigFields {
        let mut fields = BuildConfigFields::new();
        fields.put(Field::boolean("DEBUG", true));
        fields.put(Field::boolean("IS_EXOPACKAGE", false));
        fields.put(Field::int("EXOPACKAGE_FLAGS", 0));
        fields
    }

    /// Adds `field`, replacing the value of a field with the same name but
    /// keeping its position.
    pub fn put(&mut self, field: Field) {
        self.fields.insert(field.name.clone(), field);
    }

    pub fn put_all(&mut self, other: &BuildConfigFields) {
        for field in other.iter() {
            self.put(field.clone());
        }
    }

    /// These fields followed by every default field not already present.
    pub fn with_defaults(&self) -> BuildConfigFields {
        let mut fields = self.clone();
        for field in BuildConfigFields::defaults().fields.into_values() {
            if !fields.contains(&field.name) {
                fields.put(field);
            }
        }
        fields
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Field> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use buckle_node::attrs::coerce::error::CoercionErrorKind;
    use buckle_node::attrs::coerced_attr::CoercedAttr;
    use itertools::Itertools;
    use test_case::test_case;

    use super::BuildConfigFields;
    use super::DeclarationErrorReason;
    use super::Field;
    use super::FieldType;

    #[test]
    fn parses_each_type() -> anyhow::Result<()> {
        let fields = BuildConfigFields::from_field_declarations([
            "String KEYSTORE_TYPE = \"release\"",
            "int BUILD_NUMBER = 42",
            "long BUILD_DATE = 1404321113076000L",
            "float THREE = 3.0F",
            "double HALF=0.5",
            "  boolean   DEBUG   =   false  ",
        ])?;

        assert_eq!(
            vec![
                ("KEYSTORE_TYPE", FieldType::String, "\"release\""),
                ("BUILD_NUMBER", FieldType::Int, "42"),
                ("BUILD_DATE", FieldType::Long, "1404321113076000L"),
                ("THREE", FieldType::Float, "3.0F"),
                ("HALF", FieldType::Double, "0.5"),
                ("DEBUG", FieldType::Boolean, "false"),
            ],
            fields
                .iter()
                .map(|f| (f.name(), f.field_type(), f.literal()))
                .collect::<Vec<_>>()
        );

        let value = |name: &str| fields.get(name).map(|f| f.value().clone());
        assert_eq!(
            Some(CoercedAttr::String("release".into())),
            value("KEYSTORE_TYPE")
        );
        assert_eq!(Some(CoercedAttr::Int(42)), value("BUILD_NUMBER"));
        assert_eq!(
            Some(CoercedAttr::Long(1404321113076000)),
            value("BUILD_DATE")
        );
        assert_eq!(Some(CoercedAttr::Float(3.0)), value("THREE"));
        assert_eq!(Some(CoercedAttr::Bool(false)), value("DEBUG"));
        Ok(())
    }

    #[test]
    fn value_may_contain_equals() -> anyhow::Result<()> {
        let field = Field::parse("String EQ = \"a=b\"")?;
        assert_eq!(Some("a=b"), field.value().as_str());
        Ok(())
    }

    #[test]
    fn error_names_line() {
        let err = BuildConfigFields::from_field_declarations(["int A = 1", "int B 2"])
            .err()
            .unwrap();
        assert_eq!(2, err.line);
        assert_eq!("int B 2", err.text);
        assert_matches!(err.reason, DeclarationErrorReason::MissingEquals);
        assert_eq!(
            "Invalid build config field on line 2 `int B 2`: expected `TYPE NAME = VALUE`",
            err.to_string()
        );
    }

    #[test_case("B = 1", "expected exactly `TYPE NAME` before `=`")]
    #[test_case("final int B = 1", "expected exactly `TYPE NAME` before `=`")]
    #[test_case(
        "short B = 1",
        "unsupported type `short`, expected one of boolean, int, long, float, double, String"
    )]
    #[test_case("int 1B = 1", "`1B` is not a valid Java identifier")]
    #[test_case("String S = release", "`release` is not a boolean, number or string literal")]
    #[test_case("int B = 1L", "literal suffix `L` cannot be used with type `int`")]
    #[test_case("long B = 1F", "literal suffix `F` cannot be used with type `long`")]
    #[test_case("float B = 1.0D", "literal suffix `D` cannot be used with type `float`")]
    #[test_case("float RATIO = 1.5", "`1.5` is a double literal, `float` needs an `F` suffix")]
    #[test_case("float RATIO = 1e3", "`1e3` is a double literal, `float` needs an `F` suffix")]
    #[test_case(
        "long BIG = 1404321113076000",
        "integer literal `1404321113076000` is out of the 32-bit range, it needs an `L` suffix"
    )]
    #[test_case(
        "double BIG = 3000000000",
        "integer literal `3000000000` is out of the 32-bit range, it needs an `L` suffix"
    )]
    fn malformed(declaration: &str, message: &str) {
        let err = Field::parse(declaration).err().unwrap();
        assert_eq!(message, err.to_string());
    }

    #[test_case("float F = 2", FieldType::Float)]
    #[test_case("float F = 1.5f", FieldType::Float)]
    #[test_case("double D = 1.5", FieldType::Double)]
    #[test_case("double D = 1.5F", FieldType::Double)]
    #[test_case("long L = 7", FieldType::Long)]
    #[test_case("long L = -2147483648", FieldType::Long)]
    #[test_case("long L = 1404321113076000L", FieldType::Long)]
    fn java_assignable(declaration: &str, field_type: FieldType) {
        assert_matches!(Field::parse(declaration), Ok(f) if f.field_type() == field_type);
    }

    #[test]
    fn literal_of_wrong_type() {
        assert_matches!(
            Field::parse("int B = true"),
            Err(DeclarationErrorReason::Coercion(e)) => {
                assert_eq!("B", e.attr);
                assert_matches!(e.kind, CoercionErrorKind::TypeMismatch { .. });
            }
        );
        assert_matches!(
            Field::parse("int B = 3000000000"),
            Err(DeclarationErrorReason::Coercion(_))
        );
        assert_matches!(
            Field::parse("boolean B = \"true\""),
            Err(DeclarationErrorReason::Coercion(_))
        );
        assert_matches!(
            Field::parse("long B = 1.5"),
            Err(DeclarationErrorReason::Coercion(_))
        );
    }

    #[test]
    fn put_all_overrides_in_place() -> anyhow::Result<()> {
        let mut fields =
            BuildConfigFields::from_field_declarations(["int A = 1", "int B = 2", "int C = 3"])?;
        let overrides = BuildConfigFields::from_field_declarations(["int D = 4", "int B = 20"])?;
        fields.put_all(&overrides);
        assert_eq!(
            "A=1 B=20 C=3 D=4",
            fields
                .iter()
                .map(|f| format!("{}={}", f.name(), f.literal()))
                .join(" ")
        );
        Ok(())
    }

    #[test]
    fn later_declaration_wins() -> anyhow::Result<()> {
        let fields = BuildConfigFields::from_field_declarations([
            "boolean DEBUG = true",
            "int N = 1",
            "boolean DEBUG = false",
        ])?;
        assert_eq!(2, fields.len());
        assert_eq!(
            Some(&Field::boolean("DEBUG", false)),
            fields.iter().next()
        );
        Ok(())
    }

    #[test]
    fn with_defaults_appends_missing() -> anyhow::Result<()> {
        let fields = BuildConfigFields::from_field_declarations([
            "int EXOPACKAGE_FLAGS = 3",
            "String NAME = \"x\"",
        ])?
        .with_defaults();
        assert_eq!(
            vec!["EXOPACKAGE_FLAGS", "NAME", "DEBUG", "IS_EXOPACKAGE"],
            fields.iter().map(|f| f.name()).collect::<Vec<_>>()
        );
        assert_eq!(Some("3"), fields.get("EXOPACKAGE_FLAGS").map(|f| f.literal()));
        assert!(BuildConfigFields::new().is_empty());
        assert_eq!(3, BuildConfigFields::new().with_defaults().len());
        Ok(())
    }

    #[test]
    fn string_field_is_quoted() {
        let field = Field::string("MESSAGE", "say \"hi\"");
        assert_eq!(r#""say \"hi\"""#, field.literal());
        assert_eq!(Some("say \"hi\""), field.value().as_str());
    }
}
