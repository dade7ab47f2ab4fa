/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Rule attributes: declared types, raw values as produced by the build file
//! parser, and the coercion of one into the other.

pub mod attr;
pub mod attr_type;
pub mod coerce;
pub mod coerced_attr;
pub mod raw;
pub mod spec;
pub mod testing;
pub mod values;
