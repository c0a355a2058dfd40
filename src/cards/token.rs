//=========================================================================
// Token
//=========================================================================
//
// The movable unit of the shuffle scene. The payload `V` is whatever the
// presentation layer wants to attach (a card colour, a sprite handle);
// the card core only moves it around and never looks inside.
//
//=========================================================================

use crate::core::geometry::Vec2;

/// Stable identity of a token for the lifetime of its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub u32);

/// A movable unit owned by exactly one pile or one in-flight transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<V> {
    id: TokenId,
    payload: V,

    /// Current screen position; rewritten by the animator while in flight.
    pub position: Vec2,
}

impl<V> Token<V> {
    pub fn new(id: TokenId, payload: V, position: Vec2) -> Self {
        Self {
            id,
            payload,
            position,
        }
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn payload(&self) -> &V {
        &self.payload
    }

    /// Consumes the token, handing the payload back to its creator.
    pub fn into_payload(self) -> V {
        self.payload
    }
}
