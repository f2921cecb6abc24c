// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a demo run.
#[derive(Debug, Error)]
pub(crate) enum DemoError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("event {index} targets unknown item {id}")]
    UnknownItem { index: usize, id: u32 },
    #[error("item {0} is declared more than once")]
    DuplicateItem(u32),
}
