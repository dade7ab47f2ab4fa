/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Target labels, packages, cells and the patterns that select them.

pub mod cells;
pub mod env_helper;
pub mod error;
pub mod late_binding;
pub mod package;
pub mod pattern;
pub mod target;
