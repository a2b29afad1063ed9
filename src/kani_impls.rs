//! Kani proof harnesses for the encoding engine.
//!
//! # Usage
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::encoding::{self, Component, Mode};

/// Bounded arbitrary input for string-walking proofs.
fn arbitrary_text<const N: usize>() -> String {
    let len: usize = kani::any();
    let len = len % N;
    (0..len)
        .map(|_| {
            let b: u8 = kani::any();
            kani::assume(b.is_ascii());
            b as char
        })
        .collect()
}

/// Proof: encoding never panics and never emits a raw space, for any
/// component and either mode.
#[kani::proof]
#[kani::unwind(6)]
fn proof_encode_total_and_space_free() {
    let text = arbitrary_text::<4>();
    for component in [
        Component::PathSegment,
        Component::MatrixParam,
        Component::QueryParam,
        Component::Fragment,
        Component::UserInfo,
        Component::Host,
        Component::SchemeSpecificPart,
    ] {
        for mode in [Mode::Literal, Mode::PreserveEncoded] {
            let encoded = encoding::encode(&text, component, mode);
            assert!(!encoded.contains(' '));
        }
    }
}

/// Proof: literal encoding is inverted by decode for query-free
/// components (spaces in query values become `+`, which decode does not
/// touch).
#[kani::proof]
#[kani::unwind(6)]
fn proof_decode_inverts_literal_encode() {
    let text = arbitrary_text::<4>();
    let encoded = encoding::encode(&text, Component::PathSegment, Mode::Literal);
    assert_eq!(encoding::decode(&encoded), text);
}

/// Proof: preserve-mode encoding is idempotent.
#[kani::proof]
#[kani::unwind(6)]
fn proof_preserve_encode_idempotent() {
    let text = arbitrary_text::<4>();
    let once = encoding::encode(&text, Component::PathSegment, Mode::PreserveEncoded);
    let twice = encoding::encode(&once, Component::PathSegment, Mode::PreserveEncoded);
    assert_eq!(once, twice);
}
