// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

pub mod config;
pub mod relay;
pub mod ring;
pub mod status;
pub mod verify;
