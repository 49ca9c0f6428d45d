// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Build script to emit custom cfg flags based on MAXN feature selection.
//!
//! - `#[cfg(maxn_min_64)]` instead of `#[cfg(any(feature = "maxn_64", feature = "maxn_128"))]`
//! - `#[cfg(maxn_multiword)]` when a vertex set spans more than one u64

fn main() {
    println!("cargo:rustc-check-cfg=cfg(maxn_min_64)");
    println!("cargo:rustc-check-cfg=cfg(maxn_multiword)");

    #[cfg(any(feature = "maxn_64", feature = "maxn_128"))]
    println!("cargo:rustc-cfg=maxn_min_64");

    #[cfg(feature = "maxn_128")]
    println!("cargo:rustc-cfg=maxn_multiword");
}
