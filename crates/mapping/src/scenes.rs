use plottr::{Beat, BookId, Card, RichText};

use crate::{CrossReference, PlotlineStack};

/// Beat reserved for the series pseudo-book.
pub const SERIES_BEAT_ID: u32 = 1;

/// What a binder item contributes to its scene card.
#[derive(Debug, Clone, Copy)]
pub struct SceneSource<'n> {
    pub title: &'n str,
    pub synopsis: &'n str,
    pub label: Option<&'n str>,
    pub keywords: &'n [String],
}

/// Allocates cards and beats in lockstep: every card gets its own beat.
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    cards: Vec<Card>,
    beats: Vec<Beat>,
    next_card_id: u32,
    next_beat_id: u32,
    next_position: u32,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            beats: vec![Beat::new(SERIES_BEAT_ID, BookId::Series, 0)],
            next_card_id: 1,
            next_beat_id: SERIES_BEAT_ID + 1,
            next_position: 0,
        }
    }

    /// Adds a card on the active plotline and marks that plotline as used.
    pub fn emit(
        &mut self,
        scene: SceneSource<'_>,
        xref: &CrossReference<'_>,
        stack: &mut PlotlineStack,
    ) -> u32 {
        let card_id = self.next_card_id;
        let beat_id = self.next_beat_id;
        self.next_card_id += 1;
        self.next_beat_id += 1;

        let mut card = Card::new(card_id, stack.active_id(), beat_id, scene.title);
        card.description = vec![RichText::paragraph(scene.synopsis)];
        card.characters = xref.characters(scene.label, scene.keywords);
        card.tags = xref.tags(scene.keywords);
        card.color = xref.color(scene.label);

        self.beats
            .push(Beat::new(beat_id, BookId::default(), self.next_position));
        self.next_position += 1;
        self.cards.push(card);
        stack.add_card_to_active();

        card_id
    }

    #[cfg(test)]
    pub(crate) fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }

    pub fn into_parts(self) -> (Vec<Beat>, Vec<Card>) {
        (self.beats, self.cards)
    }
}
