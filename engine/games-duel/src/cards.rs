//! Card definitions for the duel deck.

/// A card the player can hold in hand.
///
/// Cards of the same kind are interchangeable, so the card itself doubles as
/// the identity of the "play this card" action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Card {
    /// Deal 6 damage
    Strike,
    /// Gain 5 block
    Defend,
    /// Deal 8 damage and apply 2 vulnerable
    Bash,
    /// Gain 8 block and draw 1 card
    ShrugItOff,
}

impl Card {
    pub const ALL: [Card; 4] = [Card::Strike, Card::Defend, Card::Bash, Card::ShrugItOff];

    /// Energy needed to play the card
    pub fn cost(self) -> u32 {
        match self {
            Card::Bash => 2,
            Card::Strike | Card::Defend | Card::ShrugItOff => 1,
        }
    }

    /// Damage dealt to the enemy before vulnerable
    pub fn damage(self) -> u32 {
        match self {
            Card::Strike => 6,
            Card::Bash => 8,
            Card::Defend | Card::ShrugItOff => 0,
        }
    }

    /// Block granted to the player
    pub fn block(self) -> u32 {
        match self {
            Card::Defend => 5,
            Card::ShrugItOff => 8,
            Card::Strike | Card::Bash => 0,
        }
    }

    /// Turns of vulnerable applied to the enemy
    pub fn vulnerable(self) -> u32 {
        match self {
            Card::Bash => 2,
            _ => 0,
        }
    }

    /// Extra cards drawn after playing
    pub fn draw(self) -> u32 {
        match self {
            Card::ShrugItOff => 1,
            _ => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Card::Strike => "Strike",
            Card::Defend => "Defend",
            Card::Bash => "Bash",
            Card::ShrugItOff => "Shrug It Off",
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The default eleven-card deck.
pub fn starter_deck() -> Vec<Card> {
    let mut deck = vec![Card::Strike; 5];
    deck.extend(std::iter::repeat(Card::Defend).take(4));
    deck.push(Card::Bash);
    deck.push(Card::ShrugItOff);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_deck_composition() {
        let deck = starter_deck();
        assert_eq!(deck.len(), 11);
        assert_eq!(deck.iter().filter(|c| **c == Card::Strike).count(), 5);
        assert_eq!(deck.iter().filter(|c| **c == Card::Defend).count(), 4);
        assert_eq!(deck.iter().filter(|c| **c == Card::Bash).count(), 1);
        assert_eq!(deck.iter().filter(|c| **c == Card::ShrugItOff).count(), 1);
    }

    #[test]
    fn test_every_card_costs_energy() {
        // Playouts terminate only if every card spends energy
        for card in Card::ALL {
            assert!(card.cost() >= 1, "{} must cost energy", card);
        }
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(Card::ShrugItOff.to_string(), "Shrug It Off");
    }
}
