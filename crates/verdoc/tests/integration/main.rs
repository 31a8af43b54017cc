// Copyright 2026 Oxide Computer Company

//! Integration tests for verdoc.

mod helpers;
