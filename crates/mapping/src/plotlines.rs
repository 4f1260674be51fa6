use plottr::{BookId, Card, Plotline, DEFAULT_LINE_TITLE};
use tracing::debug;

/// Id of the implicit plotline that exists before any folder is opened.
pub const DEFAULT_LINE_ID: u32 = 1;

/// Returned by [`PlotlineStack::open`]; remembers which plotline was active
/// so [`PlotlineStack::close`] can restore it.
#[derive(Debug)]
#[must_use = "an opened plotline must be closed"]
pub struct PlotlineHandle {
    previous: u32,
}

#[derive(Debug, Clone)]
struct OpenLine {
    line: Plotline,
    cards: usize,
}

/// Ordered plotlines with dense ids: the line with id `n` is always at
/// index `n - 1`, and its position and color follow from the id.
#[derive(Debug, Clone)]
pub struct PlotlineStack {
    lines: Vec<OpenLine>,
    active: u32,
}

impl Default for PlotlineStack {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotlineStack {
    pub fn new() -> Self {
        Self {
            lines: vec![OpenLine {
                line: Plotline::new(DEFAULT_LINE_ID, BookId::default(), DEFAULT_LINE_TITLE),
                cards: 0,
            }],
            active: DEFAULT_LINE_ID,
        }
    }

    pub fn active_id(&self) -> u32 {
        self.active
    }

    pub fn max_id(&self) -> u32 {
        self.lines.len() as u32
    }

    #[cfg(test)]
    pub(crate) fn get(&self, id: u32) -> Option<&Plotline> {
        self.slot(id).map(|open| &self.lines[open].line)
    }

    /// Starts a new plotline after all existing ones and makes it active.
    pub fn open(&mut self, title: &str) -> PlotlineHandle {
        let id = self.max_id() + 1;
        self.lines.push(OpenLine {
            line: Plotline::new(id, BookId::default(), title),
            cards: 0,
        });

        let handle = PlotlineHandle {
            previous: self.active,
        };
        self.active = id;
        handle
    }

    pub fn add_card_to_active(&mut self) {
        if let Some(index) = self.slot(self.active) {
            self.lines[index].cards += 1;
        }
    }

    /// Closes the active plotline. An empty one is deleted and every later
    /// plotline, and every card on one, moves down one id. Returns the id
    /// of the deleted plotline.
    pub fn close(&mut self, handle: PlotlineHandle, cards: &mut [Card]) -> Option<u32> {
        let mut previous = handle.previous;
        let closing = self.active;

        let pruned = match self.slot(closing) {
            Some(index) if self.lines[index].cards == 0 => {
                self.prune(index, cards);
                if previous > closing {
                    previous -= 1;
                }
                Some(closing)
            }
            _ => None,
        };

        self.active = previous;
        pruned
    }

    /// Closes the default plotline (pruning it if it never got a card) and
    /// appends the series plotline as the highest id.
    pub fn finish(mut self, cards: &mut [Card]) -> Vec<Plotline> {
        self.active = DEFAULT_LINE_ID;
        self.close(
            PlotlineHandle {
                previous: DEFAULT_LINE_ID,
            },
            cards,
        );

        let series_id = self.max_id() + 1;
        let mut lines: Vec<Plotline> = self.lines.into_iter().map(|open| open.line).collect();
        lines.push(Plotline::new(series_id, BookId::Series, DEFAULT_LINE_TITLE));
        lines
    }

    fn slot(&self, id: u32) -> Option<usize> {
        let index = id.checked_sub(1)? as usize;
        (index < self.lines.len()).then_some(index)
    }

    fn prune(&mut self, index: usize, cards: &mut [Card]) {
        let removed = self.lines.remove(index);
        debug!(
            "Pruning empty plotline {} ({:?})",
            removed.line.id, removed.line.title
        );

        let removed_id = removed.line.id;
        for open in self.lines.iter_mut().skip(index) {
            let id = open.line.id - 1;
            open.line.renumber(id);
        }
        for card in cards.iter_mut().filter(|c| c.line_id > removed_id) {
            card.line_id -= 1;
        }
    }
}
