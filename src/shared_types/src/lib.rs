//! TypeScript bindings for the toggle core are produced by `build.rs` into
//! `generated/typescript`; this crate has no Rust API of its own.
