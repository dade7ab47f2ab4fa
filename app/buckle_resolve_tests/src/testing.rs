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

use buckle_core::target::TargetLabel;
use buckle_node::attrs::attr::Attribute;
use buckle_node::attrs::attr_type::AttrType;
use buckle_node::attrs::raw::RawValue;
use buckle_node::attrs::spec::AttributeSpec;
use buckle_node::registry::RuleRegistry;
use buckle_node::registry::RuleSchema;
use buckle_resolve::RawDeclaration;

fn attr(name: &str, attribute: Attribute) -> (String, Attribute) {
    (name.to_owned(), attribute)
}

fn empty_list() -> RawValue {
    RawValue::list(Vec::<RawValue>::new())
}

/// A registry with a handful of Java and Android rules.
pub(crate) fn rule_registry() -> Arc<RuleRegistry> {
    let mut registry = RuleRegistry::new();

    registry
        .register(
            RuleSchema::new(
                "java_library",
                vec![
                    attr(
                        "srcs",
                        Attribute::with_default(
                            AttrType::list(AttrType::source()),
                            empty_list(),
                            "Java sources",
                        ),
                    ),
                    attr(
                        "deps",
                        Attribute::with_default(
                            AttrType::list(AttrType::dep()),
                            empty_list(),
                            "Libraries this one compiles against",
                        ),
                    ),
                    attr(
                        "resources",
                        Attribute::optional(AttrType::list(AttrType::path()), ""),
                    ),
                ],
            )
            .unwrap(),
        )
        .unwrap();

    registry
        .register(
            RuleSchema::new(
                "android_build_config",
                vec![
                    attr(
                        "package",
                        Attribute::required(AttrType::string(), "Java package of BuildConfig"),
                    ),
                    attr(
                        "values",
                        Attribute::with_default(
                            AttrType::list(AttrType::string()),
                            empty_list(),
                            "Field declarations, `TYPE NAME = VALUE`",
                        ),
                    ),
                    attr(
                        "use_constant_expressions",
                        Attribute::with_default(AttrType::bool(), RawValue::Bool(false), ""),
                    ),
                ],
            )
            .unwrap(),
        )
        .unwrap();

    let options = AttributeSpec::new(vec![
        attr("min_sdk", Attribute::required(AttrType::int(), "")),
        attr(
            "debuggable",
            Attribute::with_default(AttrType::bool(), RawValue::Bool(false), ""),
        ),
    ])
    .unwrap();
    registry
        .register(
            RuleSchema::new(
                "android_binary",
                vec![
                    attr("manifest", Attribute::required(AttrType::source(), "")),
                    attr(
                        "deps",
                        Attribute::with_default(
                            AttrType::list(AttrType::dep()),
                            empty_list(),
                            "",
                        ),
                    ),
                    attr("build_config", Attribute::optional(AttrType::dep(), "")),
                    attr(
                        "options",
                        Attribute::optional(AttrType::record(Arc::new(options)), ""),
                    ),
                ],
            )
            .unwrap(),
        )
        .unwrap();

    Arc::new(registry)
}

pub(crate) fn label(s: &str) -> TargetLabel {
    TargetLabel::testing_parse(s)
}

pub(crate) fn java_library(deps: &[&str], visibility: &[&str]) -> RawDeclaration {
    RawDeclaration::new(
        "java_library",
        [
            ("srcs", RawValue::list(["Foo.java"])),
            ("deps", RawValue::list(deps.iter().copied())),
            ("visibility", RawValue::list(visibility.iter().copied())),
        ],
    )
}
