use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct AgentId;
}

/// Grid coordinate. `y` grows downward, matching screen order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { x: self.x + dx, y: self.y + dy }
    }

    pub fn manhattan(self, other: Location) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Four-way compass bearing toward `target`.
    ///
    /// The dominant axis wins. An exact diagonal resolves to the clockwise-most
    /// of its two candidates, and a zero vector bears East.
    pub fn bearing_to(self, target: Location) -> Direction {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        if dx == 0 && dy == 0 {
            return Direction::East;
        }
        let (ax, ay) = (dx.abs(), dy.abs());
        if ax > ay {
            return if dx > 0 { Direction::East } else { Direction::West };
        }
        if ay > ax {
            return if dy > 0 { Direction::South } else { Direction::North };
        }
        match (dx > 0, dy > 0) {
            (true, true) => Direction::South,
            (false, true) => Direction::West,
            (false, false) => Direction::North,
            (true, false) => Direction::East,
        }
    }
}

/// Renders 1-based `(x,y)` as used in level diagnostics.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x + 1, self.y + 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn clockwise(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub fn counter_clockwise(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    pub fn reverse(self) -> Self {
        self.clockwise().clockwise()
    }

    pub fn turned(self, sign: TurnSign) -> Self {
        match sign {
            TurnSign::Clockwise => self.clockwise(),
            TurnSign::CounterClockwise => self.counter_clockwise(),
        }
    }
}

/// Sign of a quarter turn; `Clockwise` is +90°.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnSign {
    Clockwise,
    CounterClockwise,
}

impl TurnSign {
    pub fn opposite(self) -> Self {
        match self {
            TurnSign::Clockwise => TurnSign::CounterClockwise,
            TurnSign::CounterClockwise => TurnSign::Clockwise,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PortalId {
    White = 1,
    Yellow = 2,
    DarkGold = 3,
    DarkGray = 4,
}

impl PortalId {
    pub const ALL: [PortalId; 4] =
        [PortalId::White, PortalId::Yellow, PortalId::DarkGold, PortalId::DarkGray];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        PortalId::ALL.into_iter().find(|portal| portal.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            PortalId::White => "White",
            PortalId::Yellow => "Yellow",
            PortalId::DarkGold => "DarkGold",
            PortalId::DarkGray => "DarkGray",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    /// Chases the player by compass bearing. Frozen for a while after spawn.
    Tx5,
    /// Wanders without regard for the player.
    Troll,
}

impl MonsterKind {
    pub fn agent_kind(self) -> AgentKind {
        match self {
            MonsterKind::Tx5 => AgentKind::Pursuit,
            MonsterKind::Troll => AgentKind::Evasion,
        }
    }
}

/// Movement behavior an agent is driven by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgentKind {
    Seeking,
    Pursuit,
    Evasion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActorKind {
    Player,
    Monster(MonsterKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellKind {
    Empty,
    Wall,
    Pill,
    Gold,
    Ice,
    Portal(PortalId),
    PlayerSpawn,
    MonsterSpawn(MonsterKind),
}

impl CellKind {
    pub fn from_glyph(glyph: char) -> Option<Self> {
        let kind = match glyph {
            ' ' => CellKind::Empty,
            'x' => CellKind::Wall,
            '.' => CellKind::Pill,
            'g' => CellKind::Gold,
            'i' => CellKind::Ice,
            'P' => CellKind::PlayerSpawn,
            'T' => CellKind::MonsterSpawn(MonsterKind::Tx5),
            'R' => CellKind::MonsterSpawn(MonsterKind::Troll),
            digit => {
                let id = digit.to_digit(10)?;
                CellKind::Portal(PortalId::from_id(u8::try_from(id).ok()?)?)
            }
        };
        Some(kind)
    }

    pub fn glyph(self) -> char {
        match self {
            CellKind::Empty => ' ',
            CellKind::Wall => 'x',
            CellKind::Pill => '.',
            CellKind::Gold => 'g',
            CellKind::Ice => 'i',
            CellKind::PlayerSpawn => 'P',
            CellKind::MonsterSpawn(MonsterKind::Tx5) => 'T',
            CellKind::MonsterSpawn(MonsterKind::Troll) => 'R',
            CellKind::Portal(portal) => char::from(b'0' + portal.id()),
        }
    }

    pub fn item(self) -> Option<ItemKind> {
        match self {
            CellKind::Pill => Some(ItemKind::Pill),
            CellKind::Gold => Some(ItemKind::Gold),
            CellKind::Ice => Some(ItemKind::Ice),
            _ => None,
        }
    }

    pub fn actor(self) -> Option<ActorKind> {
        match self {
            CellKind::PlayerSpawn => Some(ActorKind::Player),
            CellKind::MonsterSpawn(kind) => Some(ActorKind::Monster(kind)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Pill,
    Gold,
    Ice,
}

impl ItemKind {
    pub fn score(self) -> u32 {
        match self {
            ItemKind::Pill => 1,
            ItemKind::Gold => 5,
            ItemKind::Ice => 0,
        }
    }

    /// Pills and gold are goals; ice is eaten in passing.
    pub fn is_goal(self) -> bool {
        matches!(self, ItemKind::Pill | ItemKind::Gold)
    }
}

/// Which branch of the movement policy produced a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveReason {
    /// Pathfinder step or pursuit bearing.
    Preferred,
    Turn,
    Straight,
    OppositeTurn,
    Reverse,
    /// Manual player input.
    Steered,
    /// Frozen, idle, or fully enclosed.
    Held,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemEvent {
    pub kind: ItemKind,
    pub at: Location,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelOutcome {
    Cleared,
    Caught,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    Teleported { agent: AgentId, from: Location, to: Location },
    AgentMoved { agent: AgentId, kind: AgentKind, to: Location, reason: MoveReason },
    ItemEaten { item: ItemEvent, score: u32 },
    PlayerCaught { at: Location, by: AgentId },
    LevelCleared { tick: u64 },
}

#[derive(Clone, Debug)]
pub enum AdvanceStopReason {
    Finished(LevelOutcome),
    BudgetExhausted,
}

#[derive(Clone, Debug)]
pub struct AdvanceResult {
    pub simulated_ticks: u32,
    pub stop_reason: AdvanceStopReason,
}
