/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::fmt::Display;

use crate::attrs::coerce::ctx::CoercionContext;
use crate::attrs::coerce::error::CoercionError;
use crate::attrs::coerce::error::CoercionErrorKind;
use crate::attrs::coerced_attr::CoercedAttr;
use crate::attrs::raw::RawValue;

pub mod ctx;
pub mod error;

/// One coercion rule per attribute type. Composite types delegate to the
/// coercers of the types they contain.
pub(crate) trait AttrTypeCoerce {
    fn coerce_item(
        &self,
        ctx: &CoercionContext,
        value: &RawValue,
    ) -> Result<CoercedAttr, CoercionError>;
}

pub(crate) fn type_mismatch(
    ctx: &CoercionContext,
    expected: impl Display,
    value: &RawValue,
) -> CoercionError {
    ctx.error(CoercionErrorKind::TypeMismatch {
        expected: expected.to_string(),
        actual: value.type_name(),
        value: value.to_string(),
    })
}
