/// Maneuver locked in by a combatant for the current round.
///
/// Immutable once built: re-selecting replaces the whole value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectedManeuver {
    id: String,
    name: String,
    speed: i32,
    damage: i32,
    movement: i32,
    chi_cost: u32,
    willpower_cost: u32,
    notes: String,
}

impl SelectedManeuver {
    /// Creates a maneuver with zero damage, movement and costs.
    pub fn new(id: impl Into<String>, name: impl Into<String>, speed: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            speed,
            damage: 0,
            movement: 0,
            chi_cost: 0,
            willpower_cost: 0,
            notes: String::new(),
        }
    }

    #[must_use]
    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = damage;
        self
    }

    #[must_use]
    pub fn with_movement(mut self, movement: i32) -> Self {
        self.movement = movement;
        self
    }

    #[must_use]
    pub fn with_costs(mut self, chi: u32, willpower: u32) -> Self {
        self.chi_cost = chi;
        self.willpower_cost = willpower;
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Initiative key. Lower values act first.
    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn movement(&self) -> i32 {
        self.movement
    }

    pub fn chi_cost(&self) -> u32 {
        self.chi_cost
    }

    pub fn willpower_cost(&self) -> u32 {
        self.willpower_cost
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}
