//! Declarations from `Player.h` used by the loader.

use crate::opaque_type;

opaque_type! {
    /// The SDK's player function table, created by `mdkPlayerAPI_new`.
    mdkPlayerAPI
}
