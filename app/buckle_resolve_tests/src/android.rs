/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::sync::Arc;

use anyhow::Context;
use assert_matches::assert_matches;
use buckle_build_config::generate_build_config_dot_java;
use buckle_build_config::BuildConfigFields;
use buckle_build_config::DeclarationErrorReason;
use buckle_node::attrs::coerced_attr::CoercedAttr;
use buckle_node::attrs::raw::RawValue;
use buckle_node::nodes::RuleNode;
use buckle_resolve::InMemoryDeclarations;
use buckle_resolve::RawDeclaration;
use buckle_resolve::ResolverConfig;
use buckle_resolve::RuleResolver;
use indoc::indoc;

use crate::testing::label;
use crate::testing::rule_registry;

fn build_config(values: &[&str]) -> RawDeclaration {
    RawDeclaration::new(
        "android_build_config",
        [
            ("package", RawValue::from("com.example")),
            ("values", RawValue::list(values.iter().copied())),
            ("visibility", RawValue::list(["//java/..."])),
        ],
    )
}

fn android_binary(build_config: &str) -> RawDeclaration {
    RawDeclaration::new(
        "android_binary",
        [
            ("manifest", RawValue::from("AndroidManifest.xml")),
            ("build_config", RawValue::from(build_config)),
            (
                "options",
                RawValue::dict([("min_sdk", RawValue::from(21))]),
            ),
        ],
    )
}

/// Renders `BuildConfig.java` from a resolved `android_build_config` rule.
fn generate(node: &RuleNode) -> anyhow::Result<String> {
    let package = node
        .attr("package")
        .and_then(CoercedAttr::as_str)
        .context("`package` is a string")?;
    let declarations = node
        .attr("values")
        .and_then(CoercedAttr::as_list)
        .context("`values` is a list")?
        .iter()
        .filter_map(CoercedAttr::as_str);
    let use_constant_expressions = node
        .attr("use_constant_expressions")
        .and_then(CoercedAttr::as_bool)
        .context("`use_constant_expressions` is a bool")?;

    let fields = BuildConfigFields::from_field_declarations(declarations)?;
    Ok(generate_build_config_dot_java(
        node.label(),
        package,
        use_constant_expressions,
        &fields,
    ))
}

#[tokio::test]
async fn build_config_of_resolved_binary() -> anyhow::Result<()> {
    let store = InMemoryDeclarations::new()
        .with(
            "//java/com/example:build_config",
            build_config(&["String KEYSTORE_TYPE = \"release\"", "int BUILD_NUMBER = 42"]),
        )?
        .with(
            "//java/com/example/app:app",
            android_binary("//java/com/example:build_config#graph_enhanced_craziness"),
        )?;
    let resolver = RuleResolver::new(rule_registry(), Arc::new(store), ResolverConfig::default());

    let app = resolver
        .resolve(&label("//java/com/example/app:app"), None)
        .await?;
    let options = app
        .attr("options")
        .and_then(CoercedAttr::as_record)
        .context("`options` is a record")?;
    assert_eq!(Some(21), options.get("min_sdk").and_then(CoercedAttr::as_i64));
    assert_eq!(
        Some(false),
        options.get("debuggable").and_then(CoercedAttr::as_bool)
    );

    let config_label = app
        .attr("build_config")
        .and_then(CoercedAttr::as_target)
        .context("`build_config` is a target")?;
    let config = resolver
        .get_if_resolved(config_label)
        .context("`build_config` was resolved with the binary")?;

    let expected = indoc! {r#"
        // Generated by //java/com/example:build_config. DO NOT MODIFY.
        package com.example;
        public class BuildConfig {
          private BuildConfig() {}
          public static final String KEYSTORE_TYPE = !Boolean.parseBoolean(null) ? "release" : null;
          public static final int BUILD_NUMBER = !Boolean.parseBoolean(null) ? 42 : 0;
          public static final boolean DEBUG = !Boolean.parseBoolean(null);
          public static final boolean IS_EXOPACKAGE = Boolean.parseBoolean(null);
          public static final int EXOPACKAGE_FLAGS = !Boolean.parseBoolean(null) ? 0 : 0;
        }
    "#};
    assert_eq!(expected, generate(&config)?);
    Ok(())
}

#[tokio::test]
async fn visibility_violation_is_downgraded() -> anyhow::Result<()> {
    let store = InMemoryDeclarations::new()
        .with("//java/com/example:build_config", build_config(&[]))?
        .with(
            "//apps:app",
            android_binary("//java/com/example:build_config"),
        )?;
    let resolver = RuleResolver::new(
        rule_registry(),
        Arc::new(store),
        ResolverConfig {
            enforce_visibility: false,
        },
    );

    let app = resolver.resolve(&label("//apps:app"), None).await?;
    assert_eq!(&[label("//java/com/example:build_config")], app.deps());
    Ok(())
}

#[tokio::test]
async fn malformed_declaration_in_resolved_rule() -> anyhow::Result<()> {
    let store = InMemoryDeclarations::new().with(
        "//java/com/example:build_config",
        build_config(&["boolean DEBUG = false", "int BUILD_NUMBER = \"42\""]),
    )?;
    let resolver = RuleResolver::new(rule_registry(), Arc::new(store), ResolverConfig::default());

    let config = resolver
        .resolve(&label("//java/com/example:build_config"), None)
        .await?;
    let err = generate(&config)
        .err()
        .context("`BUILD_NUMBER` is not an int")?;
    let err = err
        .downcast_ref::<buckle_build_config::DeclarationError>()
        .context("a declaration error")?;
    assert_eq!(2, err.line);
    assert_matches!(err.reason, DeclarationErrorReason::Coercion(_));
    Ok(())
}
