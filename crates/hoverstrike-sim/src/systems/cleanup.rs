//! Cleanup system: despawns destroyed entities at the end of the tick.

use crate::arena::Arena;

/// Remove every entity flagged for destruction, along with anything attached to it.
pub fn run(arena: &mut Arena) {
    let removed = arena.despawn_destroyed();
    if removed > 0 {
        tracing::trace!(removed, "despawned destroyed entities");
    }
}
