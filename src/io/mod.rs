// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for media, project files and the saved-project store.

pub mod media;
pub mod serialization;
pub mod storage;
