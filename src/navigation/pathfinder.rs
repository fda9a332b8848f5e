//! Navigation domain: grid A* answering queued path requests.

use std::collections::VecDeque;

use bevy::prelude::*;
use pathfinding::prelude::astar;

use crate::navigation::events::PathRequestEvent;
use crate::navigation::path::Path;

const STRAIGHT_COST: u32 = 10;
const DIAGONAL_COST: u32 = 14;

type Cell = (i32, i32);

/// Walkability grid over the arena.
#[derive(Debug, Clone)]
pub struct NavGrid {
    origin: Vec2,
    cell_size: f32,
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

impl NavGrid {
    /// Grid covering `min..max`. A non-positive cell size falls back to one unit.
    pub fn new(min: Vec2, max: Vec2, cell_size: f32) -> Self {
        let cell_size = if cell_size > 0.0 { cell_size } else { 1.0 };
        let extent = (max - min).max(Vec2::ZERO);
        let width = ((extent.x / cell_size).ceil() as i32).max(1);
        let height = ((extent.y / cell_size).ceil() as i32).max(1);
        Self {
            origin: min,
            cell_size,
            width,
            height,
            blocked: vec![false; (width * height) as usize],
        }
    }

    pub fn cell_of(&self, position: Vec2) -> Option<Cell> {
        let local = (position - self.origin) / self.cell_size;
        let cell = (local.x.floor() as i32, local.y.floor() as i32);
        self.in_bounds(cell).then_some(cell)
    }

    pub fn center_of(&self, cell: Cell) -> Vec2 {
        self.origin + (Vec2::new(cell.0 as f32, cell.1 as f32) + Vec2::splat(0.5)) * self.cell_size
    }

    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.blocked[self.index(cell)]
    }

    /// Blocks every cell overlapping the rectangle grown by `inflate`.
    pub fn block_rect(&mut self, min: Vec2, max: Vec2, inflate: f32) {
        let min = min - Vec2::splat(inflate);
        let max = max + Vec2::splat(inflate);
        let lo = ((min - self.origin) / self.cell_size).floor();
        let hi = ((max - self.origin) / self.cell_size).ceil();

        for y in (lo.y as i32).max(0)..(hi.y as i32).min(self.height) {
            for x in (lo.x as i32).max(0)..(hi.x as i32).min(self.width) {
                let index = self.index((x, y));
                self.blocked[index] = true;
            }
        }
    }

    /// Eight-way A* from `from` to `to`. Diagonals may not cut corners.
    /// The last waypoint is `to` itself.
    pub fn find_path(&self, from: Vec2, to: Vec2) -> Path {
        let (Some(start), Some(goal)) = (self.cell_of(from), self.cell_of(to)) else {
            return Path::failed();
        };
        if !self.is_walkable(goal) {
            return Path::failed();
        }
        if start == goal {
            return Path::new(vec![to]);
        }

        let result = astar(
            &start,
            |&cell| self.successors(cell),
            |&cell| octile_distance(cell, goal),
            |&cell| cell == goal,
        );

        match result {
            Some((cells, _cost)) => {
                let mut waypoints: Vec<Vec2> = cells
                    .iter()
                    .skip(1)
                    .map(|&cell| self.center_of(cell))
                    .collect();
                if let Some(last) = waypoints.last_mut() {
                    *last = to;
                }
                Path::new(waypoints)
            }
            None => Path::failed(),
        }
    }

    fn successors(&self, cell: Cell) -> Vec<(Cell, u32)> {
        let mut next = Vec::with_capacity(8);
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let candidate = (cell.0 + dx, cell.1 + dy);
                if !self.is_walkable(candidate) {
                    continue;
                }
                if dx != 0 && dy != 0 {
                    if !self.is_walkable((cell.0 + dx, cell.1))
                        || !self.is_walkable((cell.0, cell.1 + dy))
                    {
                        continue;
                    }
                    next.push((candidate, DIAGONAL_COST));
                } else {
                    next.push((candidate, STRAIGHT_COST));
                }
            }
        }
        next
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        cell.0 >= 0 && cell.1 >= 0 && cell.0 < self.width && cell.1 < self.height
    }

    fn index(&self, cell: Cell) -> usize {
        (cell.1 * self.width + cell.0) as usize
    }
}

fn octile_distance(a: Cell, b: Cell) -> u32 {
    let dx = (a.0 - b.0).unsigned_abs();
    let dy = (a.1 - b.1).unsigned_abs();
    STRAIGHT_COST * dx.max(dy) + (DIAGONAL_COST - STRAIGHT_COST) * dx.min(dy)
}

/// Pathfinder service. Requests queue up and are solved on a later frame.
#[derive(Resource, Debug, Clone)]
pub struct GridPathfinder {
    pub grid: NavGrid,
    pub max_per_frame: usize,
    queue: VecDeque<PathRequestEvent>,
}

impl GridPathfinder {
    pub fn new(grid: NavGrid, max_per_frame: usize) -> Self {
        Self {
            grid,
            max_per_frame: max_per_frame.max(1),
            queue: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, request: PathRequestEvent) {
        self.queue.push_back(request);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Solves up to `max_per_frame` queued requests.
    pub fn solve_batch(&mut self) -> Vec<(PathRequestEvent, Path)> {
        let count = self.max_per_frame.min(self.queue.len());
        let requests: Vec<PathRequestEvent> = self.queue.drain(..count).collect();
        requests
            .into_iter()
            .map(|request| {
                let path = self.grid.find_path(request.from, request.to);
                (request, path)
            })
            .collect()
    }
}

impl Default for GridPathfinder {
    fn default() -> Self {
        Self::new(NavGrid::new(Vec2::splat(-512.0), Vec2::splat(512.0), 32.0), 8)
    }
}
