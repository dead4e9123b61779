//! Spatial index mapping unit cells of the wall to the notes anchored there.
//!
//! The index is a quadrant tree over a square whose side is the smallest
//! power of two covering the surface. Nodes live in an arena and refer to
//! their children by index; unit cells are the leaves. Notes are indexed by
//! their top-left anchor only, so "what is near this point" is answered by
//! scanning the neighborhood of cells a note anchored there could cover.
//!
//! Every node carries a `populated` flag that is true iff some leaf below it
//! holds a note. Queries skip unpopulated subtrees. A branch that empties on
//! removal is detached and its arena slots are reused by later inserts.

#[cfg(test)]
#[path = "quadtree_test.rs"]
mod quadtree_test;

use crate::consts::NOTE_SIDE;
use crate::note::NoteId;

const ROOT: usize = 0;

#[derive(Debug, Clone)]
struct QuadNode {
    size: usize,
    /// Quadrants in order: top-left, top-right, bottom-left, bottom-right.
    children: [Option<usize>; 4],
    notes: Vec<NoteId>,
    populated: bool,
}

impl QuadNode {
    fn new(size: usize) -> Self {
        Self { size, children: [None; 4], notes: Vec::new(), populated: false }
    }

    fn is_leaf(&self) -> bool {
        self.size == 1
    }
}

/// Inclusive range of cells on both axes.
#[derive(Debug, Clone, Copy)]
struct CellRect {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

/// Arena-backed quadtree of note anchors.
#[derive(Debug, Clone)]
pub struct NoteIndex {
    size: usize,
    nodes: Vec<QuadNode>,
    /// Arena slots of detached nodes, ready for reuse.
    free: Vec<usize>,
}

impl NoteIndex {
    /// Build an empty index covering a `width` x `height` surface.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(width: f64, height: f64) -> Self {
        let largest = width.max(height);
        let mut size: usize = 2;
        while (size as f64) < largest {
            size *= 2;
        }
        Self { size, nodes: vec![QuadNode::new(size)], free: Vec::new() }
    }

    /// Side length of the indexed square, in cells.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether no note is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.nodes[ROOT].populated
    }

    /// Register `id` in the cell containing `(x, y)`.
    ///
    /// Points outside the surface are clamped to the nearest edge cell.
    pub fn insert(&mut self, x: f64, y: f64, id: NoteId) {
        let (mut cx, mut cy) = (self.cell(x), self.cell(y));
        let mut current = ROOT;
        loop {
            let node = &mut self.nodes[current];
            node.populated = true;
            if node.is_leaf() {
                node.notes.push(id);
                return;
            }
            let (quadrant, half) = quadrant_of(node.size, &mut cx, &mut cy);
            let slot = node.children[quadrant];
            current = match slot {
                Some(child) => child,
                None => {
                    let child = self.alloc(half);
                    self.nodes[current].children[quadrant] = Some(child);
                    child
                }
            };
        }
    }

    /// Notes anchored in exactly the cell containing `(x, y)`.
    #[must_use]
    pub fn query_at(&self, x: f64, y: f64) -> Vec<NoteId> {
        let (mut cx, mut cy) = (self.cell(x), self.cell(y));
        let mut current = ROOT;
        loop {
            let node = &self.nodes[current];
            if !node.populated {
                return Vec::new();
            }
            if node.is_leaf() {
                return node.notes.clone();
            }
            let (quadrant, _) = quadrant_of(node.size, &mut cx, &mut cy);
            match node.children[quadrant] {
                Some(child) => current = child,
                None => return Vec::new(),
            }
        }
    }

    /// Notes whose square, grown by `buffer` on every side, may contain `(x, y)`.
    ///
    /// Scans anchors from `x - NOTE_SIDE - buffer` to `x + buffer` (and the
    /// same on y). Each note appears at most once.
    #[must_use]
    pub fn query_near(&self, x: f64, y: f64, buffer: f64) -> Vec<NoteId> {
        let buffer = buffer.max(0.0);
        let mut found = Vec::new();
        let (Some((x0, x1)), Some((y0, y1))) = (
            self.cell_span(x - NOTE_SIDE - buffer, x + buffer),
            self.cell_span(y - NOTE_SIDE - buffer, y + buffer),
        ) else {
            return found;
        };
        self.collect(ROOT, 0, 0, CellRect { x0, y0, x1, y1 }, &mut found);
        found
    }

    /// Remove `id` from the cell containing `(x, y)`.
    ///
    /// Returns `false` when the note was not registered there. Walking back up
    /// the path, every node left empty is detached from its parent and its
    /// slot freed; the first node still populated ends the walk.
    pub fn remove(&mut self, x: f64, y: f64, id: NoteId) -> bool {
        let (mut cx, mut cy) = (self.cell(x), self.cell(y));
        let mut path = vec![ROOT];
        let mut current = ROOT;
        while !self.nodes[current].is_leaf() {
            let node = &self.nodes[current];
            let (quadrant, _) = quadrant_of(node.size, &mut cx, &mut cy);
            match node.children[quadrant] {
                Some(child) => {
                    current = child;
                    path.push(child);
                }
                None => return false,
            }
        }

        let leaf = &mut self.nodes[current];
        let Some(pos) = leaf.notes.iter().position(|n| *n == id) else {
            return false;
        };
        leaf.notes.remove(pos);
        leaf.populated = !leaf.notes.is_empty();

        for pair in path.windows(2).rev() {
            let (parent, child) = (pair[0], pair[1]);
            if self.nodes[child].populated {
                break;
            }
            for slot in &mut self.nodes[parent].children {
                if *slot == Some(child) {
                    *slot = None;
                }
            }
            self.free.push(child);
            let populated = self.nodes[parent]
                .children
                .iter()
                .flatten()
                .any(|&c| self.nodes[c].populated);
            self.nodes[parent].populated = populated;
        }
        true
    }

    /// Pre-order encoding of populated flags.
    ///
    /// A populated node writes `1` followed by each of its four quadrants (an
    /// absent quadrant writes `0`); an unpopulated node writes `0`.
    #[must_use]
    pub fn debug_signature(&self) -> String {
        let mut out = String::new();
        self.write_signature(ROOT, &mut out);
        out
    }

    // --- Internals ---

    /// A fresh node of `size`, in a freed slot when one is available.
    fn alloc(&mut self, size: usize) -> usize {
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = QuadNode::new(size);
                index
            }
            None => {
                self.nodes.push(QuadNode::new(size));
                self.nodes.len() - 1
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn cell(&self, v: f64) -> usize {
        if v.is_nan() || v <= 0.0 {
            0
        } else {
            (v.floor() as usize).min(self.size - 1)
        }
    }

    /// Cells covered by `[lo, hi]`, or `None` if the span misses the grid.
    #[allow(clippy::cast_precision_loss)]
    fn cell_span(&self, lo: f64, hi: f64) -> Option<(usize, usize)> {
        if hi < 0.0 || lo >= self.size as f64 || lo > hi {
            return None;
        }
        Some((self.cell(lo), self.cell(hi)))
    }

    fn collect(&self, index: usize, left: usize, top: usize, rect: CellRect, out: &mut Vec<NoteId>) {
        let node = &self.nodes[index];
        if !node.populated {
            return;
        }
        let right = left + node.size - 1;
        let bottom = top + node.size - 1;
        if right < rect.x0 || left > rect.x1 || bottom < rect.y0 || top > rect.y1 {
            return;
        }
        if node.is_leaf() {
            for id in &node.notes {
                if !out.contains(id) {
                    out.push(*id);
                }
            }
            return;
        }
        let half = node.size / 2;
        for (quadrant, child) in node.children.iter().enumerate() {
            if let Some(child) = child {
                let dx = if quadrant & 1 == 1 { half } else { 0 };
                let dy = if quadrant & 2 == 2 { half } else { 0 };
                self.collect(*child, left + dx, top + dy, rect, out);
            }
        }
    }

    fn write_signature(&self, index: usize, out: &mut String) {
        let node = &self.nodes[index];
        if !node.populated {
            out.push('0');
            return;
        }
        out.push('1');
        for child in node.children {
            match child {
                Some(child) => self.write_signature(child, out),
                None => out.push('0'),
            }
        }
    }
}

/// Pick the quadrant of a `size`-sided node holding cell `(cx, cy)` and
/// rebase the cell into that quadrant. Returns the quadrant and its size.
fn quadrant_of(size: usize, cx: &mut usize, cy: &mut usize) -> (usize, usize) {
    let half = size / 2;
    let mut quadrant = 0;
    if *cx >= half {
        quadrant += 1;
        *cx -= half;
    }
    if *cy >= half {
        quadrant += 2;
        *cy -= half;
    }
    (quadrant, half)
}
