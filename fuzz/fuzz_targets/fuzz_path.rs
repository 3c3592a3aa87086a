// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fuzz target for FsPath parsing and rendering

#![no_main]

use fsops_core::path::{FsPath, Separator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let path = FsPath::parse(input);

        for sep in [Separator::Slash, Separator::Backslash] {
            let _ = FsPath::parse(path.to_native(sep));
        }

        let _ = path.name();
        let _ = path.extension();
        let _ = path.parent();
        let _ = path.is_root();

        if let Some((head, tail)) = input.split_once('|') {
            let _ = FsPath::parse(head).join(tail);
        }
    }
});
