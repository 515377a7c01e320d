// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project data model.

pub mod color;
pub mod material;
pub mod object;
pub mod project;
