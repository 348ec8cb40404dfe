//! Per-activity view-model for the rendered roster.
//!
//! Availability lives here as an explicit signed count per card and is
//! mutated through methods; the UI renders text from the field instead of
//! parsing a displayed string back into a number. Both registration
//! workflows patch the roster through this type, which is the single
//! consistency point between them.

use shared::domain::Catalog;

/// One rendered activity card. Derived from the catalog once and patched
/// in place afterwards; never re-synced from the original catalog value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub spots_left: i64,
    pub participants: Vec<String>,
}

impl RosterCard {
    /// False means the card shows the "No participants yet" placeholder.
    pub fn has_participants(&self) -> bool {
        !self.participants.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    cards: Vec<RosterCard>,
}

impl Roster {
    /// Materializes cards in catalog (server) order, computing spots-left
    /// from the delivered capacity and roster length.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let cards = catalog
            .entries
            .iter()
            .map(|entry| RosterCard {
                name: entry.name.clone(),
                description: entry.details.description.clone(),
                schedule: entry.details.schedule.clone(),
                max_participants: entry.details.max_participants,
                spots_left: entry.details.spots_left(),
                participants: entry.details.participants.clone(),
            })
            .collect();
        Self { cards }
    }

    pub fn cards(&self) -> &[RosterCard] {
        &self.cards
    }

    pub fn card(&self, name: &str) -> Option<&RosterCard> {
        self.cards.iter().find(|card| card.name == name)
    }

    pub fn activity_names(&self) -> impl Iterator<Item = &str> {
        self.cards.iter().map(|card| card.name.as_str())
    }

    /// Confirmed signup: append the email and spend one spot, floored at
    /// zero. Returns false when no card matches the activity name, in
    /// which case nothing changes.
    pub fn apply_signup(&mut self, activity: &str, email: &str) -> bool {
        let Some(card) = self.card_mut(activity) else {
            return false;
        };
        card.participants.push(email.to_string());
        card.spots_left = (card.spots_left - 1).max(0);
        true
    }

    /// Confirmed unregister: drop the email's entry and release one spot.
    /// Returns false when the activity or the entry is unknown.
    pub fn apply_unregister(&mut self, activity: &str, email: &str) -> bool {
        let Some(card) = self.card_mut(activity) else {
            return false;
        };
        let Some(index) = card.participants.iter().position(|p| p == email) else {
            return false;
        };
        card.participants.remove(index);
        card.spots_left += 1;
        true
    }

    fn card_mut(&mut self, name: &str) -> Option<&mut RosterCard> {
        self.cards.iter_mut().find(|card| card.name == name)
    }
}
