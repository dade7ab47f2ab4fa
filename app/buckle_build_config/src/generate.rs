/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use buckle_core::target::TargetLabel;

use crate::fields::BuildConfigFields;
use crate::fields::Field;
use crate::fields::FieldType;

/// Evaluates to `false`, but only at run time.
const RUNTIME_FALSE: &str = "Boolean.parseBoolean(null)";

/// Generates `BuildConfig.java` with only the default fields, none of them
/// compile-time constants. Used where the real values are injected later.
pub fn generate_default_build_config_dot_java(source: &TargetLabel, java_package: &str) -> String {
    generate_build_config_dot_java(source, java_package, false, &BuildConfigFields::new())
}

/// Generates `BuildConfig.java` for `java_package`, declaring `fields`
/// followed by each default field they do not override.
///
/// Without `use_constant_expressions` no field is a constant expression, so
/// `javac` cannot inline the values into dependent classes, and the
/// compiled class can be swapped for one with different values without
/// recompiling its users.
pub fn generate_build_config_dot_java(
    source: &TargetLabel,
    java_package: &str,
    use_constant_expressions: bool,
    fields: &BuildConfigFields,
) -> String {
    let fields = fields.with_defaults();
    tracing::debug!(
        "generating BuildConfig.java for `{}` with {} fields",
        source,
        fields.len()
    );

    let mut lines = vec![
        format!("// Generated by {}. DO NOT MODIFY.", source.unflavored()),
        format!("package {};", java_package),
        "public class BuildConfig {".to_owned(),
        "  private BuildConfig() {}".to_owned(),
    ];
    lines.extend(fields.iter().map(|field| {
        let value = if use_constant_expressions {
            field.literal().to_owned()
        } else {
            non_constant_value(field)
        };
        format!(
            "  public static final {} {} = {};",
            field.field_type(),
            field.name(),
            value
        )
    }));
    lines.push("}".to_owned());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn non_constant_value(field: &Field) -> String {
    match field.field_type() {
        FieldType::Boolean => match field.value().as_bool() {
            Some(true) => format!("!{RUNTIME_FALSE}"),
            _ => RUNTIME_FALSE.to_owned(),
        },
        t => format!("!{RUNTIME_FALSE} ? {} : {}", field.literal(), t.zero()),
    }
}
