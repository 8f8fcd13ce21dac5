//! Opaque arena ids for bound entities.
//!
//! Each id is a `Copy` `u32` newtype handed out by
//! [`Arena::alloc`](crate::arena::Arena::alloc).

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an id from a raw index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_id!(
    /// Id of a bound [`Expression`](crate::expr::Expression).
    ExprId
);

define_id!(
    /// Id of a bound [`TimingNode`](crate::timing::TimingNode).
    TimingId
);

define_id!(
    /// Id of an interned type in the [`TypeDb`](crate::types::TypeDb).
    TypeId
);

define_id!(
    /// Id of a [`Scope`](crate::scope::Scope).
    ScopeId
);
