// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP acquisition: fetching pages, decoding their bytes, and reading
//! publication metadata from detail pages.

pub mod encoding;
pub mod http_client;
pub mod structured;
