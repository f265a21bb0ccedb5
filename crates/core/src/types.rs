use slotmap::new_key_type;
use thiserror::Error;

new_key_type! {
    pub struct RoomId;
    pub struct CorridorId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }
}

/// Axis-aligned rectangle in tile space. `width`/`height` are always at
/// least 1 for rects produced by the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    /// Last column inside the rect.
    pub fn right(&self) -> usize {
        self.x + self.width - 1
    }

    /// Last row inside the rect.
    pub fn bottom(&self) -> usize {
        self.y + self.height - 1
    }

    pub fn center(&self) -> Pos {
        Pos {
            y: (self.y + self.height / 2) as i32,
            x: (self.x + self.width / 2) as i32,
        }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) >= self.x
            && (pos.x as usize) <= self.right()
            && (pos.y as usize) >= self.y
            && (pos.y as usize) <= self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// Rect grown by `amount` on every side, saturating at the origin.
    pub fn expanded(&self, amount: usize) -> Rect {
        let x = self.x.saturating_sub(amount);
        let y = self.y.saturating_sub(amount);
        Rect {
            x,
            y,
            width: self.width + (self.x - x) + amount,
            height: self.height + (self.y - y) + amount,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Wall,
    Floor,
    Door,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoomType {
    Entrance,
    Exit,
    Shop,
    Treasure,
    Boss,
    Combat,
    Empty,
}

/// Classification of a non-floor tile adjacent to walkable space, plus
/// `Doorway` for the floor tiles where a corridor meets a room edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WallType {
    North,
    South,
    East,
    West,
    NorthWestCorner,
    NorthEastCorner,
    SouthWestCorner,
    SouthEastCorner,
    Interior,
    Corridor,
    Doorway,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid generation config: {reason}")]
    Config { reason: String },
    #[error("corridor selection left {components} disconnected components across {rooms} rooms")]
    Disconnected { components: usize, rooms: usize },
}
