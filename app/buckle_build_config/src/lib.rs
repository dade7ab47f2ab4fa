/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! `BuildConfig.java` generation for Android rules.
//!
//! Fields are declared as Java-like `TYPE NAME = VALUE` lines, parsed into
//! [`BuildConfigFields`] and rendered by
//! [`generate_build_config_dot_java`].

pub mod fields;
pub mod generate;
mod literal;

pub use fields::BuildConfigFields;
pub use fields::DeclarationError;
pub use fields::DeclarationErrorReason;
pub use fields::Field;
pub use fields::FieldType;
pub use generate::generate_build_config_dot_java;
pub use generate::generate_default_build_config_dot_java;
pub use literal::Suffix;
