//! Interned SystemVerilog types and the predicates timing-control binding
//! queries on them.
//!
//! Every distinct [`Type`] is stored once in the [`TypeDb`] and referenced
//! by [`TypeId`], so type equality is an id comparison.

use std::collections::HashMap;

use crate::ids::TypeId;
use serde::{Deserialize, Serialize};
use strobe_common::{Ident, Interner};

/// A SystemVerilog data type, reduced to what binding needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// A packed integral vector (`logic`, `bit`, `int`, `byte`, ...).
    Integral {
        /// Number of bits.
        width: u32,
        /// Whether arithmetic is signed.
        signed: bool,
        /// `true` for 4-state (`logic`), `false` for 2-state (`bit`).
        four_state: bool,
    },
    /// `real`
    Real,
    /// `string`
    String,
    /// `event`
    Event,
    /// `chandle`
    CHandle,
    /// `void`; also the type of a clocking block referenced as a value.
    Void,
    /// A fixed-size unpacked array.
    UnpackedArray {
        /// Element type.
        element: TypeId,
        /// Number of elements.
        size: u32,
    },
    /// A struct; packed structs are integral, unpacked ones are aggregates.
    Struct {
        /// Declared name.
        name: Ident,
        /// Whether the struct is packed.
        packed: bool,
        /// Member names and types.
        fields: Vec<(Ident, TypeId)>,
    },
    /// An enum over an integral base type.
    Enum {
        /// Declared name.
        name: Ident,
        /// The base type.
        base: TypeId,
    },
    /// The type of an expression that failed to bind.
    Error,
}

/// The packed shape of an integral type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegralShape {
    /// Number of bits.
    pub width: u32,
    /// Whether arithmetic is signed.
    pub signed: bool,
    /// Whether any bit can hold `x`/`z`.
    pub four_state: bool,
}

/// Interning store for [`Type`]s.
#[derive(Debug, Clone, Default)]
pub struct TypeDb {
    types: Vec<Type>,
    lookup: HashMap<Type, TypeId>,
}

impl TypeDb {
    /// Creates an empty type database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `ty`, returning the existing id for an identical type.
    pub fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(&id) = self.lookup.get(&ty) {
            return id;
        }
        let id = TypeId::from_raw(self.types.len() as u32);
        self.types.push(ty.clone());
        self.lookup.insert(ty, id);
        id
    }

    /// Returns the type with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not produced by this database.
    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.as_raw() as usize]
    }

    /// Number of interned types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no type has been interned.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// `logic` of the given width, unsigned.
    pub fn logic(&mut self, width: u32) -> TypeId {
        self.intern(Type::Integral {
            width,
            signed: false,
            four_state: true,
        })
    }

    /// `bit` of the given width, unsigned.
    pub fn bit(&mut self, width: u32) -> TypeId {
        self.intern(Type::Integral {
            width,
            signed: false,
            four_state: false,
        })
    }

    /// `int`
    pub fn int(&mut self) -> TypeId {
        self.intern(Type::Integral {
            width: 32,
            signed: true,
            four_state: false,
        })
    }

    /// `real`
    pub fn real(&mut self) -> TypeId {
        self.intern(Type::Real)
    }

    /// `void`
    pub fn void(&mut self) -> TypeId {
        self.intern(Type::Void)
    }

    /// The error type.
    pub fn error(&mut self) -> TypeId {
        self.intern(Type::Error)
    }

    /// Returns the packed shape of an integral type, or `None` otherwise.
    pub fn integral_shape(&self, id: TypeId) -> Option<IntegralShape> {
        match self.get(id) {
            Type::Integral {
                width,
                signed,
                four_state,
            } => Some(IntegralShape {
                width: *width,
                signed: *signed,
                four_state: *four_state,
            }),
            Type::Enum { base, .. } => self.integral_shape(*base),
            Type::Struct {
                packed: true,
                fields,
                ..
            } => {
                let mut shape = IntegralShape {
                    width: 0,
                    signed: false,
                    four_state: false,
                };
                for (_, field) in fields {
                    let inner = self.integral_shape(*field)?;
                    shape.width = shape.width.saturating_add(inner.width);
                    shape.four_state |= inner.four_state;
                }
                Some(shape)
            }
            _ => None,
        }
    }

    /// Integral types: packed vectors, enums and packed structs.
    pub fn is_integral(&self, id: TypeId) -> bool {
        match self.get(id) {
            Type::Integral { .. } | Type::Enum { .. } => true,
            Type::Struct { packed, .. } => *packed,
            _ => false,
        }
    }

    /// Numeric types: integral types and `real`.
    pub fn is_numeric(&self, id: TypeId) -> bool {
        self.is_integral(id) || matches!(self.get(id), Type::Real)
    }

    /// Aggregates: unpacked arrays and unpacked structs.
    pub fn is_aggregate(&self, id: TypeId) -> bool {
        match self.get(id) {
            Type::UnpackedArray { .. } => true,
            Type::Struct { packed, .. } => !*packed,
            _ => false,
        }
    }

    /// Opaque handle types (`chandle`).
    pub fn is_handle(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::CHandle)
    }

    /// `void`
    pub fn is_void(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Void)
    }

    /// The error type.
    pub fn is_error(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Error)
    }

    /// Types usable as a condition: numeric types, handles and events.
    pub fn is_boolean_convertible(&self, id: TypeId) -> bool {
        self.is_numeric(id) || matches!(self.get(id), Type::CHandle | Type::Event)
    }

    /// Renders a type the way it would be written in source, for diagnostics.
    pub fn describe(&self, id: TypeId, interner: &Interner) -> String {
        match self.get(id) {
            Type::Integral {
                width,
                signed,
                four_state,
            } => describe_integral(*width, *signed, *four_state),
            Type::Real => "real".to_string(),
            Type::String => "string".to_string(),
            Type::Event => "event".to_string(),
            Type::CHandle => "chandle".to_string(),
            Type::Void => "void".to_string(),
            Type::UnpackedArray { element, size } => format!(
                "{}$[0:{}]",
                self.describe(*element, interner),
                size.saturating_sub(1)
            ),
            Type::Struct { name, .. } | Type::Enum { name, .. } => {
                interner.resolve(*name).to_string()
            }
            Type::Error => "<error>".to_string(),
        }
    }
}

fn describe_integral(width: u32, signed: bool, four_state: bool) -> String {
    match (width, signed, four_state) {
        (32, true, false) => return "int".to_string(),
        (8, true, false) => return "byte".to_string(),
        (16, true, false) => return "shortint".to_string(),
        (64, true, false) => return "longint".to_string(),
        (32, true, true) => return "integer".to_string(),
        _ => {}
    }
    let keyword = if four_state { "logic" } else { "bit" };
    let sign = if signed { " signed" } else { "" };
    if width <= 1 {
        format!("{keyword}{sign}")
    } else {
        format!("{keyword}{sign}[{}:0]", width - 1)
    }
}
