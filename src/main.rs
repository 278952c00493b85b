// Copyright 2025 the Billcanvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Billcanvas: a bill and invoice template designer built with Xilem

use xilem::EventLoop;

fn main() -> anyhow::Result<()> {
    billcanvas::run(EventLoop::with_user_event())
}
