// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans (small, simple, any tiling).
//! - `strips`: binary search over a recursive strip tiling, `O(log n)` point queries.

pub mod flatvec;
pub mod strips;
