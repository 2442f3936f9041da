//! Change notifications as plain message values.
//!
//! Nothing here is broadcast: each signal is returned to the component's
//! structural parent, and the orchestrator dispatches it to its one consumer.

use crate::cart::CartLineId;

/// Produced by an amount widget when (and only when) its stored value
/// actually changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Updated;

/// Message a cart line hands back to the cart that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineSignal {
    /// The line's amount changed and its price was recomputed; the cart
    /// refreshes its totals.
    Updated,
    /// The line asks to be removed. Carries the line's own identity; removal
    /// of an id the cart does not hold is a no-op.
    Remove(CartLineId),
}
