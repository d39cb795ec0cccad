use failure::Error;
use std::mem;

use crate::errors::RunError;
use crate::values::{Cell, ObjRef, Type};

/// A fixed pool of cells carved out once at startup. Allocation pops the
/// free list and nothing is ever pushed back onto it.
#[derive(Debug)]
pub struct Heap {
    /// slot 0 is nil, slots 1..=capacity are the allocatable cells
    cells: Vec<Cell>,
    free: Option<ObjRef>,
    free_count: usize,
}

impl Heap {
    /// create an arena holding exactly `capacity` allocatable cells
    pub fn new(capacity: usize) -> Heap {
        let mut cells = Vec::with_capacity(capacity + 1);
        cells.push(Cell::Nil);

        // link every cell into the free list, so the highest address comes out first
        let mut free = None;
        for i in 1..=capacity {
            cells.push(Cell::Free { next: free });
            free = Some(ObjRef(i as u32));
        }

        Heap {
            cells,
            free,
            free_count: capacity,
        }
    }

    /// create an arena from a memory budget in bytes
    pub fn from_region_size(bytes: usize) -> Heap {
        Heap::new(bytes / mem::size_of::<Cell>())
    }

    /// take a cell off the free list and store `cell` in it
    pub fn alloc(&mut self, cell: Cell) -> Result<ObjRef, Error> {
        let obj = match self.free {
            Some(obj) => obj,
            None => Err(RunError::ArenaExhausted(self.capacity()))?,
        };

        self.free = match self.cells[obj.index()] {
            Cell::Free { next } => next,
            ref other => panic!("free list corrupted: {:?} is a {}", obj, other.get_type()),
        };
        self.cells[obj.index()] = cell;
        self.free_count -= 1;
        Ok(obj)
    }

    pub fn cons(&mut self, car: ObjRef, cdr: ObjRef) -> Result<ObjRef, Error> {
        self.alloc(Cell::Pair(car, cdr))
    }

    #[inline]
    pub fn get(&self, obj: ObjRef) -> &Cell {
        &self.cells[obj.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, obj: ObjRef) -> &mut Cell {
        &mut self.cells[obj.index()]
    }

    #[inline]
    pub fn type_of(&self, obj: ObjRef) -> Type {
        self.get(obj).get_type()
    }

    /// the head of a pair, or None for anything else
    pub fn car(&self, obj: ObjRef) -> Option<ObjRef> {
        match self.get(obj) {
            Cell::Pair(car, _) => Some(*car),
            _ => None,
        }
    }

    /// the tail of a pair, or None for anything else
    pub fn cdr(&self, obj: ObjRef) -> Option<ObjRef> {
        match self.get(obj) {
            Cell::Pair(_, cdr) => Some(*cdr),
            _ => None,
        }
    }

    /// replace the tail of a pair. non-pairs are left alone
    pub fn set_cdr(&mut self, obj: ObjRef, value: ObjRef) {
        if let Cell::Pair(_, cdr) = self.get_mut(obj) {
            *cdr = value;
        }
    }

    pub fn number(&self, obj: ObjRef) -> Option<f32> {
        match self.get(obj) {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// total number of allocatable cells
    pub fn capacity(&self) -> usize {
        self.cells.len() - 1
    }

    pub fn free_count(&self) -> usize {
        self.free_count
    }

    pub fn used_count(&self) -> usize {
        self.capacity() - self.free_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cell_starts_free() {
        let heap = Heap::new(8);
        assert_eq!(heap.capacity(), 8);
        assert_eq!(heap.free_count(), 8);
        assert_eq!(heap.used_count(), 0);
        for i in 1..=8 {
            assert_eq!(heap.type_of(ObjRef(i)), Type::Free);
        }
        assert_eq!(heap.type_of(ObjRef::NIL), Type::Nil);
    }

    #[test]
    fn allocation_runs_in_reverse_address_order() {
        let mut heap = Heap::new(3);
        let a = heap.alloc(Cell::Number(1.0)).unwrap();
        let b = heap.alloc(Cell::Number(2.0)).unwrap();
        assert_eq!(a, ObjRef(3));
        assert_eq!(b, ObjRef(2));
        assert_eq!(heap.number(a), Some(1.0));
    }

    #[test]
    fn exhausted_arena_fails_fast() {
        let mut heap = Heap::new(2);
        heap.cons(ObjRef::NIL, ObjRef::NIL).unwrap();
        heap.cons(ObjRef::NIL, ObjRef::NIL).unwrap();

        let err = heap.alloc(Cell::Nil).unwrap_err();
        match err.downcast_ref::<RunError>() {
            Some(RunError::ArenaExhausted(2)) => {}
            other => panic!("expected ArenaExhausted, got {:?}", other),
        }
        // a failed allocation changes nothing
        assert_eq!(heap.free_count(), 0);
        assert_eq!(heap.used_count(), 2);
    }

    #[test]
    fn free_and_used_cells_add_up() {
        let mut heap = Heap::new(16);
        let mut allocated = Vec::new();
        for i in 0..10 {
            allocated.push(heap.alloc(Cell::Number(i as f32)).unwrap());
            assert_eq!(heap.free_count() + heap.used_count(), heap.capacity());
        }
        allocated.sort_by_key(|o| o.0);
        allocated.dedup();
        assert_eq!(allocated.len(), 10);
    }

    #[test]
    fn nil_is_never_allocated() {
        let mut heap = Heap::new(4);
        for _ in 0..4 {
            let obj = heap.alloc(Cell::Free { next: None }).unwrap();
            assert!(!obj.is_nil());
        }
    }

    #[test]
    fn pair_accessors() {
        let mut heap = Heap::new(4);
        let one = heap.alloc(Cell::Number(1.0)).unwrap();
        let pair = heap.cons(one, ObjRef::NIL).unwrap();
        assert_eq!(heap.car(pair), Some(one));
        assert_eq!(heap.cdr(pair), Some(ObjRef::NIL));
        assert_eq!(heap.car(one), None);

        heap.set_cdr(pair, one);
        assert_eq!(heap.cdr(pair), Some(one));
    }

    #[test]
    fn region_size_is_divided_into_cells() {
        let heap = Heap::from_region_size(mem::size_of::<Cell>() * 10 + 3);
        assert_eq!(heap.capacity(), 10);
    }
}
