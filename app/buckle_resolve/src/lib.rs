/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Resolution of targets into rule nodes.
//!
//! [`RuleResolver`] looks up each target's declaration, coerces it against
//! its rule schema, and recursively resolves its dependencies. Results are
//! memoized per resolver; dependency cycles are reported as errors, both
//! within a single resolution path and across concurrent ones.

pub mod config;
mod cycles;
pub mod error;
pub mod resolver;
pub mod store;
mod wait_for;

pub use config::ResolverConfig;
pub use error::ResolveError;
pub use error::ResolveErrorKind;
pub use resolver::RuleResolver;
pub use store::DeclarationStore;
pub use store::InMemoryDeclarations;
pub use store::RawDeclaration;
