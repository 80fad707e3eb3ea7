use super::{Shift, Slot};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Weekday of the timetable.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    /// All weekdays in scan order.
    pub const ALL: [Self; 5] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    const fn position(self) -> usize {
        self as usize
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A named run of consecutive periods inside one shift.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Block {
    MorningEarly,
    MorningLate,
    AfternoonEarly,
    AfternoonLate,
    NightEarly,
    NightLate,
}

impl Block {
    /// All blocks in the order of the day.
    pub const ALL: [Self; 6] = [
        Self::MorningEarly,
        Self::MorningLate,
        Self::AfternoonEarly,
        Self::AfternoonLate,
        Self::NightEarly,
        Self::NightLate,
    ];

    /// Number of class periods in the block.
    #[must_use]
    pub const fn periods(self) -> u32 {
        match self {
            Self::MorningEarly | Self::AfternoonLate | Self::NightLate => 3,
            Self::MorningLate | Self::AfternoonEarly | Self::NightEarly => 2,
        }
    }

    /// Shift whose programs may use the block.
    #[must_use]
    pub const fn shift(self) -> Shift {
        match self {
            Self::NightEarly | Self::NightLate => Shift::Night,
            _ => Shift::Day,
        }
    }

    /// Short label: shift initial followed by the period numbers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MorningEarly => "M123",
            Self::MorningLate => "M45",
            Self::AfternoonEarly => "T12",
            Self::AfternoonLate => "T345",
            Self::NightEarly => "N12",
            Self::NightLate => "N345",
        }
    }

    const fn position(self) -> usize {
        self as usize
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Weekly grid of colors. Every cell holds at most one color.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Timetable {
    cells: [[Option<usize>; 6]; 5],
}

impl Timetable {
    /// Creates an empty timetable.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the color bound to the cell.
    #[must_use]
    pub const fn get(&self, slot: Slot) -> Option<usize> {
        self.cells[slot.day.position()][slot.block.position()]
    }

    /// Binds a color to the cell, replacing whatever it held.
    pub fn bind(&mut self, slot: Slot, color: usize) {
        self.cells[slot.day.position()][slot.block.position()] = Some(color);
    }

    /// Iterates over every occupied cell in day then block order.
    pub fn cells(&self) -> impl Iterator<Item = (Day, Block, usize)> + '_ {
        Day::ALL.into_iter().flat_map(move |day| {
            Block::ALL.into_iter().filter_map(move |block| {
                self.get(Slot::new(day, block)).map(|color| (day, block, color))
            })
        })
    }

    /// Returns the number of occupied cells.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.cells().count()
    }
}
