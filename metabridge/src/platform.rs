//! Fixed platform marker names used to recognize special type shapes.
//!
//! These are properties of the target platform, not configuration; keeping
//! them in one place keeps the synthesis and signature code free of
//! scattered literals.

use regex::Regex;
use std::sync::LazyLock;

/// classifier family for function types: `kotlin/Function0`, `kotlin/Function1`, ...
pub static FUNCTION_FAMILY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^kotlin/Function[0-9]+$").expect("static pattern compiles"));

/// classifier whose presence as the next-to-last argument marks the
/// continuation-passing calling convention
pub const CONTINUATION_MARKER: &str = "kotlin/coroutines/Continuation";

/// descriptor that generic-erased parameter types collapse to
pub const OBJECT_DESCRIPTOR: &str = "Ljava/lang/Object;";

/// flexibility id carried by the upper bound of platform-inferred types,
/// as opposed to explicitly nullable ones
pub const PLATFORM_TYPE_ID: &str = "kotlin.jvm.PlatformType";
