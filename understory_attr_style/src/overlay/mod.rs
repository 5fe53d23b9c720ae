// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlays: dialogs, the modal mask, toasts and tooltips.
//!
//! Dialogs, the mask and toasts animate through inline style changes
//! separated by timer waits, so their effects show up as the host calls
//! [`Engine::advance`](crate::Engine::advance). Tooltips show and hide at once.

mod dialog;
mod mask;
mod toast;
mod tooltip;

use alloc::format;
use alloc::string::String;

pub(crate) use dialog::DialogState;
pub use dialog::DialogOptions;
pub use mask::MASK_Z_INDEX;
pub use toast::ToastOptions;
pub use tooltip::{TOOLTIP_ID, TooltipText};

fn px(value: f64) -> String {
    format!("{value}px")
}
