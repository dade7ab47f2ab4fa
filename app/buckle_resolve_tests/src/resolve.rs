/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::collections::HashSet;
use std::sync::Arc;

use assert_matches::assert_matches;
use buckle_node::attrs::coerce::error::CoercionErrorKind;
use buckle_node::attrs::raw::RawValue;
use buckle_node::registry::RULE_REGISTRY;
use buckle_resolve::InMemoryDeclarations;
use buckle_resolve::RawDeclaration;
use buckle_resolve::ResolveErrorKind;
use buckle_resolve::ResolverConfig;
use buckle_resolve::RuleResolver;
use dupe::Dupe;
use maplit::hashset;

use crate::testing::java_library;
use crate::testing::label;
use crate::testing::rule_registry;

fn resolver(store: InMemoryDeclarations) -> RuleResolver {
    RuleResolver::new(rule_registry(), Arc::new(store), ResolverConfig::default())
}

#[tokio::test]
async fn resolves_through_global_registry() -> anyhow::Result<()> {
    RULE_REGISTRY.init(rule_registry())?;

    let store = InMemoryDeclarations::new()
        .with("//app:main", java_library(&["//lib:base"], &[]))?
        .with("//lib:base", java_library(&[], &["PUBLIC"]))?;
    let resolver = RuleResolver::from_global_registry(Arc::new(store))?;
    assert!(resolver.config().enforce_visibility);

    let main = resolver.resolve(&label("//app:main"), None).await?;
    assert_eq!("java_library", main.rule_type().as_str());
    assert_eq!(&[label("//lib:base")], main.deps());
    assert!(resolver.get_if_resolved(&label("//lib:base")).is_some());
    Ok(())
}

#[tokio::test]
async fn diamond_constructs_each_node_once() -> anyhow::Result<()> {
    let store = InMemoryDeclarations::new()
        .with(
            "//app:main",
            java_library(&["//lib/left:left", "//lib/right:right"], &[]),
        )?
        .with(
            "//lib/left:left",
            java_library(&["//lib/base:base"], &["//app/..."]),
        )?
        .with(
            "//lib/right:right",
            java_library(&["//lib/base:base"], &["//app/..."]),
        )?
        .with(
            "//lib/base:base",
            java_library(&[], &["//lib/left:", "//lib/right:right"]),
        )?;
    let resolver = resolver(store);

    let results = resolver
        .resolve_many(&[label("//app:main"), label("//lib/left:left")])
        .await;
    assert_eq!(2, results.len());
    for result in results {
        result?;
    }
    assert_eq!(4, resolver.constructions());

    let resolved: HashSet<_> = [
        "//app:main",
        "//lib/left:left",
        "//lib/right:right",
        "//lib/base:base",
    ]
    .into_iter()
    .filter(|t| resolver.get_if_resolved(&label(t)).is_some())
    .collect();
    assert_eq!(
        hashset! {"//app:main", "//lib/left:left", "//lib/right:right", "//lib/base:base"},
        resolved
    );
    Ok(())
}

#[tokio::test]
async fn recursive_visibility_pattern() -> anyhow::Result<()> {
    let store = InMemoryDeclarations::new()
        .with("//app/feature:x", java_library(&["//lib:util"], &[]))?
        .with("//tools:x", java_library(&["//lib:util"], &[]))?
        .with("//lib:util", java_library(&[], &["//app/..."]))?;
    let resolver = resolver(store);

    resolver.resolve(&label("//app/feature:x"), None).await?;

    let err = resolver
        .resolve(&label("//tools:x"), None)
        .await
        .err()
        .unwrap();
    assert_eq!(&[label("//tools:x"), label("//lib:util")], err.chain());
    assert_matches!(err.kind(), ResolveErrorKind::Visibility(e) => {
        assert_eq!(label("//lib:util"), e.target);
        assert_eq!(label("//tools:x"), e.requester);
    });
    assert!(err.to_string().contains("//app/..."), "{err}");
    Ok(())
}

#[tokio::test]
async fn flavored_dependency() -> anyhow::Result<()> {
    let store = InMemoryDeclarations::new()
        .with("//app:main", java_library(&["//lib:base#src"], &[]))?
        .with("//lib:base", java_library(&[], &["PUBLIC"]))?;
    let resolver = resolver(store);

    let main = resolver.resolve(&label("//app:main"), None).await?;
    let dep = resolver
        .get_if_resolved(&main.deps()[0])
        .expect("dependency is resolved");
    assert_eq!(&label("//lib:base#src"), dep.label());
    assert!(resolver.get_if_resolved(&label("//lib:base")).is_none());
    Ok(())
}

#[tokio::test]
async fn nested_coercion_error_names_attribute() -> anyhow::Result<()> {
    let store = InMemoryDeclarations::new()
        .with(
            "//app:bin",
            RawDeclaration::new(
                "android_binary",
                [
                    ("manifest", RawValue::from("AndroidManifest.xml")),
                    ("deps", RawValue::list(["//lib:base"])),
                ],
            ),
        )?
        .with(
            "//lib:base",
            RawDeclaration::new(
                "android_binary",
                [
                    ("manifest", RawValue::from("AndroidManifest.xml")),
                    (
                        "options",
                        RawValue::dict([("min_sdk", RawValue::from("21"))]),
                    ),
                ],
            ),
        )?;
    let resolver = resolver(store);

    let err = resolver
        .resolve(&label("//app:bin"), None)
        .await
        .err()
        .unwrap();
    assert_eq!(&[label("//app:bin"), label("//lib:base")], err.chain());
    assert_matches!(err.kind(), ResolveErrorKind::Coercion(e) => {
        assert_eq!(Some(label("//lib:base")), e.target);
        assert_eq!("options.min_sdk", e.attr);
        assert_matches!(e.kind, CoercionErrorKind::TypeMismatch { .. });
    });
    assert_eq!(0, resolver.constructions());
    Ok(())
}

#[tokio::test]
async fn schema_violations() -> anyhow::Result<()> {
    let store = Arc::new(
        InMemoryDeclarations::new()
            .with(
                "//app:no_manifest",
                RawDeclaration::new("android_binary", Vec::<(String, RawValue)>::new()),
            )?
            .with(
                "//app:typo",
                RawDeclaration::new("java_library", [("dep", RawValue::list(["//a:b"]))]),
            )?,
    );
    let resolver = RuleResolver::new(
        rule_registry(),
        store.dupe(),
        ResolverConfig::default(),
    );

    assert_matches!(
        resolver.resolve(&label("//app:no_manifest"), None).await,
        Err(e) => assert_matches!(
            e.kind(),
            ResolveErrorKind::Coercion(c) => assert_eq!(
                CoercionErrorKind::MissingRequiredField("manifest".to_owned()),
                c.kind
            )
        )
    );
    assert_matches!(
        resolver.resolve(&label("//app:typo"), None).await,
        Err(e) => assert_matches!(
            e.kind(),
            ResolveErrorKind::Coercion(c) => assert_eq!(
                CoercionErrorKind::UnknownField("dep".to_owned()),
                c.kind
            )
        )
    );
    assert_eq!(2, store.len());
    Ok(())
}
