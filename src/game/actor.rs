//! Actor identity
//!
//! Actors are referenced through lightweight generational handles rather
//! than pointers. A slot freed by a despawn can be reused, and the bumped
//! generation keeps stale handles from matching the newcomer: a handle to a
//! despawned enemy never resolves to the prop that reused its slot.

/// Handle to one actor in a world.
///
/// Two handles with the same slot index but different generations refer to
/// different actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Actor {
    index: u32,
    generation: u32,
}

impl Actor {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index, used to address component storage.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Hands out actor handles and tracks which are still alive.
pub struct ActorAllocator {
    /// Current generation of each slot
    generations: Vec<u32>,
    /// Freed slots available for reuse
    free: Vec<u32>,
    alive: u32,
}

impl ActorAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free: Vec::new(),
            alive: 0,
        }
    }

    pub fn allocate(&mut self) -> Actor {
        self.alive += 1;
        match self.free.pop() {
            // Reused slot - its generation was bumped when it was freed
            Some(index) => Actor::new(index, self.generations[index as usize]),
            None => {
                let index = self.generations.len() as u32;
                self.generations.push(0);
                Actor::new(index, 0)
            }
        }
    }

    /// Free an actor's slot. Returns false if the handle was already dead,
    /// making a double free a no-op.
    pub fn free(&mut self, actor: Actor) -> bool {
        if !self.is_alive(actor) {
            return false;
        }
        self.generations[actor.index() as usize] += 1;
        self.free.push(actor.index());
        self.alive -= 1;
        true
    }

    pub fn is_alive(&self, actor: Actor) -> bool {
        let idx = actor.index() as usize;
        idx < self.generations.len() && self.generations[idx] == actor.generation()
    }

    pub fn alive_count(&self) -> u32 {
        self.alive
    }

    /// Invalidate every outstanding handle and make all slots reusable.
    pub fn clear(&mut self) {
        for generation in &mut self.generations {
            *generation += 1;
        }
        self.free.clear();
        for index in 0..self.generations.len() as u32 {
            self.free.push(index);
        }
        self.alive = 0;
    }
}

impl Default for ActorAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_free() {
        let mut allocator = ActorAllocator::new();

        let a = allocator.allocate();
        let b = allocator.allocate();
        assert_eq!(allocator.alive_count(), 2);
        assert!(allocator.is_alive(a));
        assert!(allocator.is_alive(b));

        assert!(allocator.free(a));
        assert_eq!(allocator.alive_count(), 1);
        assert!(!allocator.is_alive(a));
        assert!(allocator.is_alive(b));
    }

    #[test]
    fn test_double_free_is_noop() {
        let mut allocator = ActorAllocator::new();
        let a = allocator.allocate();

        assert!(allocator.free(a));
        assert!(!allocator.free(a));
        assert_eq!(allocator.alive_count(), 0);
    }

    #[test]
    fn test_stale_handle_does_not_match_reused_slot() {
        let mut allocator = ActorAllocator::new();

        let old = allocator.allocate();
        allocator.free(old);

        let reused = allocator.allocate();
        assert_eq!(reused.index(), old.index());
        assert_ne!(reused.generation(), old.generation());
        assert!(!allocator.is_alive(old));
        assert!(allocator.is_alive(reused));
    }

    #[test]
    fn test_clear_invalidates_everything() {
        let mut allocator = ActorAllocator::new();
        let a = allocator.allocate();
        let b = allocator.allocate();

        allocator.clear();
        assert_eq!(allocator.alive_count(), 0);
        assert!(!allocator.is_alive(a));
        assert!(!allocator.is_alive(b));

        // Slots come back with fresh generations
        let c = allocator.allocate();
        assert!(allocator.is_alive(c));
        assert!(!allocator.is_alive(a));
    }
}
