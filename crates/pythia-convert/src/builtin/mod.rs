//! Built-in converters for the std scalar types.
//!
//! All numeric converters share the same textual grammar: surrounding
//! whitespace is trimmed, values may be decimal, octal (`0` prefix) or
//! hexadecimal (`0x`/`0X` prefix) with an optional sign ahead of the radix
//! prefix, and the case-insensitive aliases `min`/`max` name the target
//! type's extremes. Floating-point converters additionally accept `nan`,
//! `positive_infinity` and `negative_infinity` (case-insensitive) plus
//! standard decimal/scientific notation.

mod misc;
mod num;

pub use misc::{
    BoolConverter, CharConverter, DurationConverter, PathBufConverter, SocketAddrConverter,
    StringConverter,
};
pub use num::{
    F32Converter, F64Converter, I128Converter, I16Converter, I32Converter, I64Converter,
    I8Converter, U16Converter, U32Converter, U64Converter, U8Converter, UsizeConverter,
};

use std::sync::Arc;

use crate::ConverterRegistry;

/// Registers every built-in converter in `registry` at the default priority.
pub fn register_defaults(registry: &mut ConverterRegistry) {
    registry.register::<i8>(Arc::new(I8Converter));
    registry.register::<i16>(Arc::new(I16Converter));
    registry.register::<i32>(Arc::new(I32Converter));
    registry.register::<i64>(Arc::new(I64Converter));
    registry.register::<i128>(Arc::new(I128Converter));
    registry.register::<u8>(Arc::new(U8Converter));
    registry.register::<u16>(Arc::new(U16Converter));
    registry.register::<u32>(Arc::new(U32Converter));
    registry.register::<u64>(Arc::new(U64Converter));
    registry.register::<usize>(Arc::new(UsizeConverter));
    registry.register::<f32>(Arc::new(F32Converter));
    registry.register::<f64>(Arc::new(F64Converter));
    registry.register::<bool>(Arc::new(BoolConverter));
    registry.register::<char>(Arc::new(CharConverter));
    registry.register::<String>(Arc::new(StringConverter));
    registry.register::<std::path::PathBuf>(Arc::new(PathBufConverter));
    registry.register::<std::net::SocketAddr>(Arc::new(SocketAddrConverter));
    registry.register::<std::time::Duration>(Arc::new(DurationConverter));
}
