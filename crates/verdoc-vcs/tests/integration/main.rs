// Copyright 2026 Oxide Computer Company

//! Integration tests for verdoc-vcs, run against the real git binary.

mod helpers;
