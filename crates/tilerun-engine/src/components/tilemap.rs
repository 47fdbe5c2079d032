//! Tile grid for level collision.
//!
//! A level is a rectangular grid of character-coded cells. Each character maps
//! to a `TileKind` that decides how moving bodies interact with the cell.
//! Pixel space is Y-down: row 0 is the top of the map.

use glam::Vec2;
use thiserror::Error;

/// Collision semantics of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    /// Open air.
    Passable,
    /// Blocks movement from every side.
    Solid,
    /// One-way platform: can be stood on, but not sideways- or ceiling-solid.
    GroundOnly,
    /// Passable, but kills whatever touches it.
    Hazard,
    /// Empty cell with no graphic. Behaves like `Passable`.
    Void,
}

impl TileKind {
    /// Map a level character to its kind. Unknown characters are solid.
    pub fn from_char(ch: char) -> Self {
        match ch {
            '.' => TileKind::Passable,
            ' ' => TileKind::Void,
            'g' => TileKind::GroundOnly,
            '?' => TileKind::Hazard,
            _ => TileKind::Solid,
        }
    }

    /// Blocks horizontal movement and upward movement.
    pub fn blocks_sideways(self) -> bool {
        self == TileKind::Solid
    }

    /// Stops a descending body.
    pub fn blocks_descent(self) -> bool {
        matches!(self, TileKind::Solid | TileKind::GroundOnly)
    }
}

/// A single cell: its source character plus derived kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub ch: char,
    pub kind: TileKind,
}

impl Tile {
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            kind: TileKind::from_char(ch),
        }
    }
}

/// Errors raised while parsing level text.
#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    #[error("level text contains no rows")]
    Empty,
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("tile size {width}x{height} must be positive")]
    BadTileSize { width: f32, height: f32 },
}

/// Read-only tile grid for one level.
///
/// Tiles are stored in row-major order: index = row * width + col.
/// Lookups outside the grid resolve as `TileKind::Solid`, so nothing can leave
/// the map through its edges.
#[derive(Debug, Clone)]
pub struct TileGrid {
    /// Width of the grid in tiles.
    width: u32,
    /// Height of the grid in tiles.
    height: u32,
    tile_width: f32,
    tile_height: f32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create a grid filled with a single character.
    pub fn filled(width: u32, height: u32, tile_width: f32, tile_height: f32, ch: char) -> Self {
        Self {
            width,
            height,
            tile_width,
            tile_height,
            tiles: vec![Tile::new(ch); (width * height) as usize],
        }
    }

    /// Parse level text: one row per non-empty line, one character per tile.
    pub fn parse(text: &str, tile_width: f32, tile_height: f32) -> Result<Self, MapError> {
        if !(tile_width > 0.0 && tile_height > 0.0) {
            return Err(MapError::BadTileSize {
                width: tile_width,
                height: tile_height,
            });
        }

        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(MapError::Empty);
        };

        let width = first.chars().count();
        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            tiles.extend(line.chars().map(Tile::new));
        }

        log::debug!("parsed level: {}x{} tiles", width, rows.len());
        Ok(Self {
            width: width as u32,
            height: rows.len() as u32,
            tile_width,
            tile_height,
            tiles,
        })
    }

    /// Width of the grid in tiles.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the grid in tiles.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_width(&self) -> f32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> f32 {
        self.tile_height
    }

    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tile_width
    }

    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tile_height
    }

    /// Y of the top edge of the bottom row: the lowest a body's feet may reach.
    pub fn floor_y(&self) -> f32 {
        self.pixel_height() - self.tile_height
    }

    /// Tile at grid position, or `None` when off the map.
    pub fn get(&self, col: i32, row: i32) -> Option<&Tile> {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        self.tiles.get((row as u32 * self.width + col as u32) as usize)
    }

    /// Kind of the tile at grid position. Off-map cells are `Solid`.
    pub fn tile_at(&self, col: i32, row: i32) -> TileKind {
        self.get(col, row).map_or(TileKind::Solid, |t| t.kind)
    }

    /// Source character at grid position, if on the map.
    pub fn char_at(&self, col: i32, row: i32) -> Option<char> {
        self.get(col, row).map(|t| t.ch)
    }

    /// Top-left pixel corner of a tile. Defined for off-map cells too.
    pub fn pixel_origin_of(&self, col: i32, row: i32) -> Vec2 {
        Vec2::new(col as f32 * self.tile_width, row as f32 * self.tile_height)
    }

    /// Grid position containing a pixel coordinate.
    pub fn world_to_tile(&self, x: f32, y: f32) -> (i32, i32) {
        (self.col_of(x), self.row_of(y))
    }

    pub fn col_of(&self, x: f32) -> i32 {
        (x / self.tile_width).floor() as i32
    }

    pub fn row_of(&self, y: f32) -> i32 {
        (y / self.tile_height).floor() as i32
    }
}

/// The fixed set of levels for a session and the index of the active one.
#[derive(Debug, Clone)]
pub struct LevelSet {
    grids: Vec<TileGrid>,
    current: usize,
}

impl LevelSet {
    /// Returns `None` when no grids are supplied.
    pub fn new(grids: Vec<TileGrid>) -> Option<Self> {
        if grids.is_empty() {
            return None;
        }
        Some(Self { grids, current: 0 })
    }

    pub fn current(&self) -> &TileGrid {
        &self.grids[self.current]
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Whether the active level is the last one.
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.grids.len()
    }

    /// Swap to the next level. Returns false (and stays put) on the last level.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }
}
