/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::fmt::Write;

use buckle_core::target::TargetLabel;

use crate::attrs::coerce::error::CoercionError;
use crate::attrs::coerce::error::CoercionErrorKind;

#[derive(Clone, Copy, Debug)]
enum Segment<'a> {
    Root,
    Field(&'a str),
    Index(usize),
    Key(&'a str),
}

/// Where in a rule's arguments a value is being coerced.
///
/// Only used to build error messages: coercion results never depend on the
/// context. Contexts form a stack on the call stack, one frame per nested
/// field, list element or dict entry.
#[derive(Clone, Copy, Debug)]
pub struct CoercionContext<'a> {
    target: Option<&'a TargetLabel>,
    parent: Option<&'a CoercionContext<'a>>,
    segment: Segment<'a>,
}

impl<'a> CoercionContext<'a> {
    pub fn new(target: &'a TargetLabel) -> CoercionContext<'a> {
        CoercionContext {
            target: Some(target),
            parent: None,
            segment: Segment::Root,
        }
    }

    /// Context for values that do not belong to any target, such as
    /// attribute defaults or build config literals.
    pub fn no_target() -> CoercionContext<'static> {
        CoercionContext {
            target: None,
            parent: None,
            segment: Segment::Root,
        }
    }

    pub fn target(&self) -> Option<&'a TargetLabel> {
        self.target
    }

    pub fn field<'b>(&'b self, name: &'b str) -> CoercionContext<'b> {
        self.child(Segment::Field(name))
    }

    pub fn index(&self, index: usize) -> CoercionContext<'_> {
        self.child(Segment::Index(index))
    }

    pub fn key<'b>(&'b self, key: &'b str) -> CoercionContext<'b> {
        self.child(Segment::Key(key))
    }

    fn child<'b>(&'b self, segment: Segment<'b>) -> CoercionContext<'b> {
        CoercionContext {
            target: self.target,
            parent: Some(self),
            segment,
        }
    }

    /// Renders the attribute path, e.g. `deps[0]`, `config.name` or
    /// `env["HOME"]`. Empty at the root.
    pub fn attr_path(&self) -> String {
        let mut segments = Vec::new();
        let mut cur = Some(self);
        while let Some(ctx) = cur {
            segments.push(ctx.segment);
            cur = ctx.parent;
        }

        let mut path = String::new();
        for segment in segments.into_iter().rev() {
            // Writing to a `String` cannot fail.
            let _ = match segment {
                Segment::Root => Ok(()),
                Segment::Field(name) if path.is_empty() => write!(path, "{name}"),
                Segment::Field(name) => write!(path, ".{name}"),
                Segment::Index(i) => write!(path, "[{i}]"),
                Segment::Key(k) => write!(path, "[{k:?}]"),
            };
        }
        path
    }

    pub fn error(&self, kind: CoercionErrorKind) -> CoercionError {
        CoercionError {
            target: self.target.cloned(),
            attr: self.attr_path(),
            kind,
        }
    }
}
