//! Map terrain and agent occupancy index.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// What a map cell probe can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Free,
    /// Out of bounds or obstacle.
    Blocked,
    /// Another agent stands here.
    Occupied,
}

impl Cell {
    /// Sensor encoding fed to the brains: blocked = -1, free = 0,
    /// occupied = +1.
    #[inline]
    pub fn signal(self) -> f32 {
        match self {
            Cell::Blocked => -1.0,
            Cell::Free => 0.0,
            Cell::Occupied => 1.0,
        }
    }
}

/// Square obstacle map.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Terrain {
    size: u16,
    /// blocked[y][x]
    blocked: Vec<Vec<bool>>,
}

impl Terrain {
    pub fn new(size: u16) -> Self {
        Self {
            size,
            blocked: vec![vec![false; size as usize]; size as usize],
        }
    }

    /// Scatter `count` obstacles on distinct clear cells.
    pub fn scatter_obstacles(&mut self, count: usize, rng: &mut impl Rng) {
        let mut placed = 0;
        while placed < count {
            let x = rng.gen_range(0..self.size) as usize;
            let y = rng.gen_range(0..self.size) as usize;
            if !self.blocked[y][x] {
                self.blocked[y][x] = true;
                placed += 1;
            }
        }
    }

    #[inline]
    pub fn size(&self) -> u16 {
        self.size
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.size as i32 && y >= 0 && y < self.size as i32
    }

    #[inline]
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        !self.in_bounds(x, y) || self.blocked[y as usize][x as usize]
    }

    pub fn obstacle_count(&self) -> usize {
        self.blocked.iter().flatten().filter(|&&b| b).count()
    }
}

/// Per-cell index of agent slots for collision checks and sensing.
#[derive(Clone, Debug)]
pub struct Occupancy {
    size: u16,
    /// cells[y][x] holds the index of the agent standing there.
    cells: Vec<Vec<Option<usize>>>,
}

impl Occupancy {
    pub fn new(size: u16) -> Self {
        Self {
            size,
            cells: vec![vec![None; size as usize]; size as usize],
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            for cell in row {
                *cell = None;
            }
        }
    }

    #[inline]
    pub fn insert(&mut self, x: u16, y: u16, agent_idx: usize) {
        if x < self.size && y < self.size {
            self.cells[y as usize][x as usize] = Some(agent_idx);
        }
    }

    #[inline]
    pub fn remove(&mut self, x: u16, y: u16) {
        if x < self.size && y < self.size {
            self.cells[y as usize][x as usize] = None;
        }
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.size as i32 && y >= 0 && y < self.size as i32 {
            self.cells[y as usize][x as usize]
        } else {
            None
        }
    }

    #[inline]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some()
    }
}

/// Combined probe used by movement checks and the ring sensors.
pub fn probe(terrain: &Terrain, occupancy: &Occupancy, x: i32, y: i32) -> Cell {
    if terrain.is_blocked(x, y) {
        Cell::Blocked
    } else if occupancy.is_occupied(x, y) {
        Cell::Occupied
    } else {
        Cell::Free
    }
}
