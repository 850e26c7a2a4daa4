//! The single opponent of a duel.

/// What the enemy will do at the end of the player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Hit the player for this much, plus strength
    Attack(u32),
    /// Gain this much strength
    Buff(u32),
}

/// Intents repeat in this order.
pub const INTENT_CYCLE: [Intent; 3] = [Intent::Attack(11), Intent::Buff(3), Intent::Attack(7)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub hp: u32,
    pub max_hp: u32,
    pub strength: u32,
    /// Remaining turns of vulnerable (+50% damage taken)
    pub vulnerable: u32,
    intent_index: usize,
}

impl Enemy {
    pub fn new(max_hp: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            strength: 0,
            vulnerable: 0,
            intent_index: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    /// Upcoming action.
    pub fn intent(&self) -> Intent {
        INTENT_CYCLE[self.intent_index % INTENT_CYCLE.len()]
    }

    /// Apply card damage, amplified while vulnerable. Returns damage dealt.
    pub fn take_damage(&mut self, base: u32) -> u32 {
        let amount = if self.vulnerable > 0 {
            base + base / 2
        } else {
            base
        };
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }

    /// Carry out the current intent and advance to the next one.
    /// Returns the attack damage aimed at the player, if any.
    pub fn act(&mut self) -> Option<u32> {
        let attack = match self.intent() {
            Intent::Attack(base) => Some(base + self.strength),
            Intent::Buff(amount) => {
                self.strength += amount;
                None
            }
        };
        self.intent_index = (self.intent_index + 1) % INTENT_CYCLE.len();
        self.vulnerable = self.vulnerable.saturating_sub(1);
        attack
    }
}
