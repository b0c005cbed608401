// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod context;
mod record;
mod value;

pub use context::{EventContext, EventParams};
pub use record::{EventRecord, MapRecord};
pub use value::{ProductValue, SideData};
