//! Opaque identifiers supplied by the host.
//!
//! The engine never interprets these numbers; job catalogs map them to names.

use core::fmt;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident($inner:ty), $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub $inner);

        impl $name {
            /// Returns the raw identifier.
            #[must_use]
            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

opaque_id!(
    /// Identifier of an action (ability, spell, weaponskill, item use).
    ActionId(u32),
    "action"
);

opaque_id!(
    /// Identifier of a status effect (buff or debuff).
    StatusId(u32),
    "status"
);

opaque_id!(
    /// Identifier of a bounded resource gauge.
    GaugeId(u16),
    "gauge"
);

opaque_id!(
    /// Identifier of a battle target.
    TargetId(u64),
    "target"
);
