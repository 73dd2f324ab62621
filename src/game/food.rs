use super::effects::PowerUpKind;
use crate::consts;
use enum_map::Enum;
use ratatui::{layout::Position, style::Style};

/// The three tiers of ordinary food.  The tier decides both the points
/// awarded and how many segments the snake gains.
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum ScoreTier {
    Red,
    Blue,
    Green,
}

impl ScoreTier {
    pub(crate) fn value(self) -> u32 {
        match self {
            ScoreTier::Red => 1,
            ScoreTier::Blue => 2,
            ScoreTier::Green => 3,
        }
    }

    pub(crate) fn symbol(self) -> char {
        match self {
            ScoreTier::Red => '1',
            ScoreTier::Blue => '2',
            ScoreTier::Green => '3',
        }
    }

    pub(crate) fn style(self) -> Style {
        match self {
            ScoreTier::Red => consts::RED_FOOD_STYLE,
            ScoreTier::Blue => consts::BLUE_FOOD_STYLE,
            ScoreTier::Green => consts::GREEN_FOOD_STYLE,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FoodKind {
    Score(ScoreTier),
    PowerUp(PowerUpKind),
}

impl FoodKind {
    /// Points awarded for eating food of this kind
    pub(crate) fn points(self) -> u32 {
        match self {
            FoodKind::Score(tier) => tier.value(),
            FoodKind::PowerUp(_) => consts::POWER_UP_POINTS,
        }
    }

    /// Segments the snake gains from eating food of this kind
    pub(crate) fn extra_growth(self) -> usize {
        match self {
            FoodKind::Score(ScoreTier::Red) | FoodKind::PowerUp(_) => 0,
            FoodKind::Score(ScoreTier::Blue) => 1,
            FoodKind::Score(ScoreTier::Green) => 2,
        }
    }

    pub(crate) fn symbol(self) -> char {
        match self {
            FoodKind::Score(tier) => tier.symbol(),
            FoodKind::PowerUp(kind) => kind.symbol(),
        }
    }

    pub(crate) fn style(self) -> Style {
        match self {
            FoodKind::Score(tier) => tier.style(),
            FoodKind::PowerUp(kind) => kind.style(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    pub(crate) position: Position,
    pub(crate) kind: FoodKind,
}

impl Food {
    pub(crate) fn score(position: Position, tier: ScoreTier) -> Food {
        Food {
            position,
            kind: FoodKind::Score(tier),
        }
    }

    pub(crate) fn power_up(position: Position, kind: PowerUpKind) -> Food {
        Food {
            position,
            kind: FoodKind::PowerUp(kind),
        }
    }
}

/// The food currently on the grid.  Holds at most
/// [`MAX_FOODS`][consts::MAX_FOODS] items, no two of which share a cell.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct FoodSet(Vec<Food>);

impl FoodSet {
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len() >= consts::MAX_FOODS
    }

    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.iter().any(|f| f.position == pos)
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Food> {
        self.0.iter()
    }

    pub(crate) fn as_slice(&self) -> &[Food] {
        &self.0
    }

    /// Add `food` to the set.  Returns `false` (and leaves the set unchanged)
    /// if the set is full or `food` would share a cell with another item.
    pub(crate) fn insert(&mut self, food: Food) -> bool {
        if self.is_full() || self.occupies(food.position) {
            return false;
        }
        self.0.push(food);
        true
    }

    /// Remove and return the item at `pos`, if any
    pub(crate) fn take(&mut self, pos: Position) -> Option<Food> {
        let i = self.0.iter().position(|f| f.position == pos)?;
        Some(self.0.remove(i))
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}
