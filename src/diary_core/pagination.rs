//! Notebook pagination.
//!
//! Entries are shown two at a time, like a spread of a paper notebook.
//! Turning a page is a two-phase transition: after [`PageTiming::flip`] the
//! page index moves, and after a further [`PageTiming::settle`] the notebook
//! accepts navigation again. Navigation requested while a page is turning is
//! dropped, not queued.
//!
//! The state machine itself is [`step`], a pure function of
//! `(state, event, now)`. [`Pager`] wraps it with a [`Clock`] for callers that
//! just want to press "next".

use crate::constants::{ENTRIES_PER_PAGE, PAGE_FLIP_DELAY_MS, PAGE_SETTLE_DELAY_MS};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::debug;

/// Number of spreads needed for `count` entries. An empty diary still has
/// one (empty) page.
///
/// # Examples
///
/// ```
/// use dye_diary::diary_core::total_pages;
///
/// assert_eq!(total_pages(0), 1);
/// assert_eq!(total_pages(3), 2);
/// assert_eq!(total_pages(4), 2);
/// ```
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(ENTRIES_PER_PAGE).max(1)
}

/// Clamps `page` into `0..total_pages(count)`.
pub fn clamp_page(page: usize, count: usize) -> usize {
    page.min(total_pages(count) - 1)
}

/// The two slots of the spread starting at `page * ENTRIES_PER_PAGE`.
///
/// The right slot is empty on a last page holding an odd entry; both are
/// empty past the end.
pub fn visible_window<T>(items: &[T], page: usize) -> (Option<&T>, Option<&T>) {
    let start = page.saturating_mul(ENTRIES_PER_PAGE);
    (items.get(start), items.get(start.saturating_add(1)))
}

/// Which page the notebook opens on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LandingPolicy {
    /// Open on the first spread and stay put after adding an entry.
    First,
    /// Open on the last spread and jump there after adding an entry, so the
    /// most recent entry is always in view.
    #[default]
    Last,
}

impl FromStr for LandingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(LandingPolicy::First),
            "last" => Ok(LandingPolicy::Last),
            other => Err(format!(
                "unknown landing page '{}', expected 'first' or 'last'",
                other
            )),
        }
    }
}

impl fmt::Display for LandingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LandingPolicy::First => f.write_str("first"),
            LandingPolicy::Last => f.write_str("last"),
        }
    }
}

/// Durations of the two transition phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTiming {
    pub flip: Duration,
    pub settle: Duration,
}

impl Default for PageTiming {
    fn default() -> Self {
        PageTiming {
            flip: Duration::from_millis(PAGE_FLIP_DELAY_MS),
            settle: Duration::from_millis(PAGE_SETTLE_DELAY_MS),
        }
    }
}

impl PageTiming {
    /// Transitions that complete on the first tick.
    pub fn instant() -> Self {
        PageTiming {
            flip: Duration::ZERO,
            settle: Duration::ZERO,
        }
    }
}

/// Fixed parameters of the pager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagerConfig {
    pub timing: PageTiming,
    pub landing: LandingPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning {
        direction: Direction,
        started_at: Instant,
        /// Whether the page index has already moved.
        turned: bool,
    },
}

/// Why the collection was reloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadReason {
    /// First load when the notebook is opened.
    Initial,
    /// An entry was added to the end of the collection.
    Appended,
    /// An entry was edited, deleted or patched.
    Changed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerEvent {
    Next,
    Previous,
    /// Advance the transition timers to `now`.
    Tick,
    /// Go straight to a page without animation. Clamped; ignored while turning.
    JumpTo(usize),
    /// The collection now holds `count` entries.
    Reload { count: usize, reason: ReloadReason },
}

/// Observable consequences of a [`step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerEffect {
    TurnStarted(Direction),
    PageChanged { from: usize, to: usize },
    Settled,
    /// Navigation arrived while a page was turning and was dropped.
    Ignored(Direction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerState {
    pub current_page: usize,
    pub total_pages: usize,
    pub phase: Phase,
}

impl Default for PagerState {
    fn default() -> Self {
        PagerState {
            current_page: 0,
            total_pages: 1,
            phase: Phase::Idle,
        }
    }
}

impl PagerState {
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    fn last_page(&self) -> usize {
        self.total_pages.saturating_sub(1)
    }

    fn move_to(&mut self, page: usize, effects: &mut Vec<PagerEffect>) {
        let to = page.min(self.last_page());
        if to != self.current_page {
            effects.push(PagerEffect::PageChanged {
                from: self.current_page,
                to,
            });
            self.current_page = to;
        }
    }
}

/// Applies `event` at time `now`.
///
/// Invariant: `0 <= current_page < total_pages` holds for the returned state
/// whenever it held for `state`.
pub fn step(
    state: PagerState,
    event: PagerEvent,
    now: Instant,
    config: &PagerConfig,
) -> (PagerState, Vec<PagerEffect>) {
    let mut next = state;
    let mut effects = Vec::new();

    match event {
        PagerEvent::Next | PagerEvent::Previous => {
            let direction = if event == PagerEvent::Next {
                Direction::Forward
            } else {
                Direction::Backward
            };
            if state.is_transitioning() {
                effects.push(PagerEffect::Ignored(direction));
                return (next, effects);
            }
            let can_move = match direction {
                Direction::Forward => state.current_page < state.last_page(),
                Direction::Backward => state.current_page > 0,
            };
            if can_move {
                next.phase = Phase::Transitioning {
                    direction,
                    started_at: now,
                    turned: false,
                };
                effects.push(PagerEffect::TurnStarted(direction));
            }
        }
        PagerEvent::Tick => {
            if let Phase::Transitioning {
                direction,
                started_at,
                mut turned,
            } = state.phase
            {
                let elapsed = now.saturating_duration_since(started_at);
                if !turned && elapsed >= config.timing.flip {
                    let target = match direction {
                        Direction::Forward => state.current_page.saturating_add(1),
                        Direction::Backward => state.current_page.saturating_sub(1),
                    };
                    next.move_to(target, &mut effects);
                    turned = true;
                }
                if turned && elapsed >= config.timing.flip + config.timing.settle {
                    next.phase = Phase::Idle;
                    effects.push(PagerEffect::Settled);
                } else {
                    next.phase = Phase::Transitioning {
                        direction,
                        started_at,
                        turned,
                    };
                }
            }
        }
        PagerEvent::JumpTo(page) => {
            if !state.is_transitioning() {
                next.move_to(page, &mut effects);
            }
        }
        PagerEvent::Reload { count, reason } => {
            next.total_pages = total_pages(count);
            let last = next.last_page();
            let target = match (reason, config.landing) {
                (ReloadReason::Initial, LandingPolicy::First) => 0,
                (ReloadReason::Initial | ReloadReason::Appended, LandingPolicy::Last) => {
                    // The landing page replaces whatever turn is in flight; the
                    // settle phase still runs out before input is accepted.
                    if let Phase::Transitioning {
                        direction,
                        started_at,
                        ..
                    } = state.phase
                    {
                        next.phase = Phase::Transitioning {
                            direction,
                            started_at,
                            turned: true,
                        };
                    }
                    last
                }
                _ => clamp_page(next.current_page, count),
            };
            if target != state.current_page {
                effects.push(PagerEffect::PageChanged {
                    from: state.current_page,
                    to: target,
                });
            }
            next.current_page = target;
        }
    }

    (next, effects)
}

/// Source of monotonic time for a [`Pager`].
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// handle and give another to the pager.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Stateful wrapper around [`step`].
pub struct Pager {
    state: PagerState,
    config: PagerConfig,
    clock: Box<dyn Clock>,
}

impl Pager {
    pub fn new(config: PagerConfig, clock: Box<dyn Clock>) -> Self {
        Pager {
            state: PagerState::default(),
            config,
            clock,
        }
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.state.total_pages
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning()
    }

    pub fn next(&mut self) -> Vec<PagerEffect> {
        self.apply(PagerEvent::Next)
    }

    pub fn previous(&mut self) -> Vec<PagerEffect> {
        self.apply(PagerEvent::Previous)
    }

    pub fn tick(&mut self) -> Vec<PagerEffect> {
        self.apply(PagerEvent::Tick)
    }

    pub fn jump_to(&mut self, page: usize) -> Vec<PagerEffect> {
        self.apply(PagerEvent::JumpTo(page))
    }

    pub fn reload(&mut self, count: usize, reason: ReloadReason) -> Vec<PagerEffect> {
        self.apply(PagerEvent::Reload { count, reason })
    }

    fn apply(&mut self, event: PagerEvent) -> Vec<PagerEffect> {
        let (state, effects) = step(self.state, event, self.clock.now(), &self.config);
        self.state = state;
        for effect in &effects {
            debug!(?event, ?effect, page = state.current_page, "pager");
        }
        effects
    }
}
