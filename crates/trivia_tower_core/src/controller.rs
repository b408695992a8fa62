//! The game controller: level lifecycle, matching, hints, score and timers.
//!
//! All input arrives as method calls (card click, hint, next level, reset,
//! dialog dismissal) or as fired [`GameTimer`]s. Each call runs to
//! completion; `board_locked` is the only guard against input arriving
//! while a pair is still being revealed.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

use crate::card::{CardId, CardState, Deck};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::level::Level;
use crate::pairing::PartnerLookup;
use crate::presentation::{Control, Presentation, VisualState, format_clock};
use crate::schedule::{GameTimer, Scheduler, TimerId, TimerQueue};
use crate::scoring::DECAY_PENALTY;
use crate::state::{GameState, LevelPhase, Resolution};

/// Granularity of the level countdown.
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Owns one game session and drives a [`Presentation`].
#[derive(Debug)]
pub struct GameController<P, S> {
    config: GameConfig,
    state: GameState,
    phase: LevelPhase,
    deck: Deck,
    lookup: PartnerLookup,
    presentation: P,
    scheduler: S,
    rng: StdRng,
    countdown: Option<TimerId>,
    decay: Option<TimerId>,
    level_timers: Vec<TimerId>,
}

impl<P: Presentation, S: Scheduler> GameController<P, S> {
    /// Creates an idle controller with an OS-seeded shuffle.
    #[instrument(skip_all, fields(levels = config.levels().len()))]
    pub fn new(config: GameConfig, presentation: P, scheduler: S) -> Self {
        Self::with_rng(config, presentation, scheduler, StdRng::from_os_rng())
    }

    /// Creates an idle controller whose shuffles are reproducible.
    #[instrument(skip(config, presentation, scheduler))]
    pub fn with_seed(config: GameConfig, presentation: P, scheduler: S, seed: u64) -> Self {
        Self::with_rng(config, presentation, scheduler, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, presentation: P, scheduler: S, rng: StdRng) -> Self {
        Self {
            config,
            state: GameState::default(),
            phase: LevelPhase::Idle,
            deck: Deck::default(),
            lookup: PartnerLookup::default(),
            presentation,
            scheduler,
            rng,
            countdown: None,
            decay: None,
            level_timers: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────────

    /// Session state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    /// Cards of the active level.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Configuration in use.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The level at `current_level_index`.
    pub fn current_level(&self) -> Option<&Level> {
        self.config.levels().get(self.state.current_level_index)
    }

    /// The presentation collaborator.
    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    /// Mutable access to the presentation collaborator.
    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    // ─────────────────────────────────────────────────────────────
    //  Lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Starts the session: deals level 0, then arms the passive decay.
    ///
    /// # Errors
    ///
    /// Fails if level 0 is missing or malformed.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<(), GameError> {
        info!("Starting game");
        self.start_level(0)?;
        self.ensure_decay();
        Ok(())
    }

    /// Deals the level at `index` and arms its countdown.
    ///
    /// Any previous countdown and pending reveal timers are cancelled first.
    ///
    /// # Errors
    ///
    /// Fails without touching the current board if the level is missing or
    /// malformed.
    #[instrument(skip(self))]
    pub fn start_level(&mut self, index: usize) -> Result<(), GameError> {
        let count = self.config.levels().len();
        let level = self
            .config
            .levels()
            .get(index)
            .ok_or(GameError::NoSuchLevel { index, count })?;
        level.validate(index + 1)?;

        let hints = *level.hints();
        let time = *level.time();
        let lookup = PartnerLookup::for_level(level);
        let deck = Deck::shuffled(level, &mut self.rng);

        self.stop_countdown();
        self.cancel_level_timers();

        self.state.current_level_index = index;
        self.state.matched_pair_count = 0;
        self.state.clear_selection();
        self.state.board_locked = false;
        self.state.scoreboard.reset_streak();
        self.state.hints_remaining = hints;
        self.state.seconds_remaining = time;
        self.lookup = lookup;
        self.deck = deck;
        self.phase = LevelPhase::Active;

        self.presentation.render_cards(&self.deck.views());
        self.presentation.update_score_text(self.state.score());
        self.presentation.update_combo_text(0, 0);
        self.presentation.set_combo_highlight(false);
        self.presentation.update_hint_count(hints);
        self.presentation.set_control_enabled(Control::Hint, hints > 0);
        self.presentation.set_control_enabled(Control::NextLevel, false);
        self.presentation.update_timer_text(&format_clock(time));

        self.countdown = Some(
            self.scheduler
                .schedule_every(COUNTDOWN_PERIOD, GameTimer::CountdownTick),
        );

        info!(
            level = index + 1,
            cards = self.deck.len(),
            time,
            hints,
            "Level started"
        );
        Ok(())
    }

    /// Moves on after a level ends.
    ///
    /// Honoured after a timeout or once the completion dialog was
    /// dismissed; ignored otherwise. Past the last level the session ends
    /// with the final notice.
    ///
    /// # Errors
    ///
    /// Fails if the next level is malformed.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn next_level(&mut self) -> Result<(), GameError> {
        if !self.phase.can_advance() {
            debug!("Next level ignored");
            return Ok(());
        }
        if self.has_next_level() {
            self.start_level(self.state.current_level_index + 1)
        } else {
            self.finish_game();
            Ok(())
        }
    }

    /// Reports that the player closed the level-complete dialog.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn dismiss_level_complete(&mut self) {
        if self.phase != LevelPhase::Resolving(Resolution::Won) {
            debug!("No level-complete dialog to dismiss");
            return;
        }
        if self.has_next_level() {
            self.phase = LevelPhase::NextLevelReady;
            self.presentation
                .set_control_enabled(Control::NextLevel, true);
        } else {
            self.finish_game();
        }
    }

    /// Returns to level 0 with a zeroed score and streaks.
    ///
    /// # Errors
    ///
    /// Fails if level 0 is missing or malformed.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn reset(&mut self) -> Result<(), GameError> {
        info!(score = self.state.score(), "Resetting game");
        self.stop_countdown();
        self.state.scoreboard.reset();
        self.state.current_level_index = 0;
        self.start_level(0)?;
        self.ensure_decay();
        Ok(())
    }

    /// Cancels every timer, the passive decay included.
    #[instrument(skip(self))]
    pub fn teardown(&mut self) {
        self.stop_countdown();
        self.cancel_level_timers();
        if let Some(id) = self.decay.take() {
            self.scheduler.cancel(id);
        }
        info!("Game torn down");
    }

    // ─────────────────────────────────────────────────────────────
    //  Input
    // ─────────────────────────────────────────────────────────────

    /// Handles a click on a card.
    ///
    /// Ignored while the board is locked, for matched cards, for the card
    /// already selected, and outside an active level.
    #[instrument(skip(self), fields(card = %id))]
    pub fn select_card(&mut self, id: CardId) {
        if !self.phase.is_active() || self.state.board_locked {
            debug!(phase = %self.phase, "Board not accepting input");
            return;
        }
        let Some(card) = self.deck.get(id) else {
            warn!("Unknown card");
            return;
        };
        if card.is_matched() || self.state.first_selected == Some(id) {
            debug!("Card not selectable");
            return;
        }

        self.deck.set_state(id, CardState::Selected);
        self.presentation
            .set_card_visual_state(id, VisualState::Selected);

        match self.state.first_selected {
            None => {
                self.state.first_selected = Some(id);
            }
            Some(first) => {
                self.state.second_selected = Some(id);
                self.state.board_locked = true;
                self.evaluate_pair(first, id);
            }
        }
    }

    /// Highlights one findable pair and spends a hint.
    #[instrument(skip(self), fields(hints = self.state.hints_remaining))]
    pub fn request_hint(&mut self) {
        if !self.phase.is_active() || self.state.board_locked || self.state.hints_remaining == 0 {
            debug!("Hint unavailable");
            return;
        }
        let Some((first, second)) = self.lookup.find_hint(self.deck.unmatched()) else {
            warn!("No matchable pair left; hint not spent");
            return;
        };

        self.presentation.set_card_visual_state(first, VisualState::Hint);
        self.presentation.set_card_visual_state(second, VisualState::Hint);
        let delay = self.config.timing().hint_highlight();
        self.schedule_level_timer(delay, GameTimer::ClearHint { first, second });

        self.state.hints_remaining -= 1;
        let hints = self.state.hints_remaining;
        self.presentation.update_hint_count(hints);
        self.presentation.set_control_enabled(Control::Hint, hints > 0);
        info!(%first, %second, hints, "Hint used");
    }

    /// Runs a fired timer.
    #[instrument(skip(self))]
    pub fn on_timer(&mut self, timer: GameTimer) {
        match timer {
            GameTimer::CountdownTick => self.tick_countdown(),
            GameTimer::DecayTick => self.apply_decay(),
            GameTimer::ResolvePair { first, second } => self.finish_reveal(first, second),
            GameTimer::ClearHint { first, second } => {
                for id in [first, second] {
                    if let Some(card) = self.deck.get(id) {
                        let state = VisualState::from(*card.state());
                        self.presentation.set_card_visual_state(id, state);
                    }
                }
            }
            GameTimer::ComboFade => self.presentation.set_combo_highlight(false),
            GameTimer::ShowLevelComplete => {
                if self.phase == LevelPhase::Resolving(Resolution::Won) {
                    self.presentation
                        .show_level_complete_dialog(self.state.current_level_index + 1);
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Matching
    // ─────────────────────────────────────────────────────────────

    fn evaluate_pair(&mut self, first: CardId, second: CardId) {
        let is_match = match (self.deck.get(first), self.deck.get(second)) {
            (Some(a), Some(b)) => self.lookup.is_match(a.label(), b.label()),
            _ => false,
        };
        if is_match {
            self.resolve_match(first, second);
        } else {
            self.resolve_mismatch(first, second);
        }
    }

    fn resolve_match(&mut self, first: CardId, second: CardId) {
        for id in [first, second] {
            self.deck.set_state(id, CardState::Matched);
            self.presentation.set_card_visual_state(id, VisualState::Matched);
        }
        self.state.matched_pair_count += 1;
        let award = self.state.scoreboard.record_match();

        self.presentation.update_score_text(self.state.score());
        self.presentation
            .update_combo_text(*award.combo(), *award.bonus());
        if *award.combo() > 1 {
            self.presentation.set_combo_highlight(true);
            let delay = self.config.timing().combo_flash();
            self.schedule_level_timer(delay, GameTimer::ComboFade);
        }
        info!(
            %first,
            %second,
            points = award.points(),
            combo = *award.combo(),
            score = self.state.score(),
            "Match"
        );

        let delay = self.config.timing().match_reveal();
        self.schedule_level_timer(delay, GameTimer::ResolvePair { first, second });

        let pair_count = self.current_level().map_or(0, Level::pair_count);
        if self.state.matched_pair_count == pair_count {
            self.complete_level();
        }
    }

    fn resolve_mismatch(&mut self, first: CardId, second: CardId) {
        for id in [first, second] {
            self.presentation.set_card_visual_state(id, VisualState::Error);
        }
        self.state.scoreboard.record_mismatch();
        self.presentation.update_score_text(self.state.score());
        self.presentation.update_combo_text(0, 0);
        info!(%first, %second, score = self.state.score(), "Mismatch");

        let delay = self.config.timing().mismatch_reveal();
        self.schedule_level_timer(delay, GameTimer::ResolvePair { first, second });
    }

    fn finish_reveal(&mut self, first: CardId, second: CardId) {
        if self.state.first_selected != Some(first) || self.state.second_selected != Some(second) {
            debug!("Stale reveal ignored");
            return;
        }
        for id in [first, second] {
            let selected = self
                .deck
                .get(id)
                .is_some_and(|card| *card.state() == CardState::Selected);
            if selected {
                self.deck.set_state(id, CardState::Unmatched);
                self.presentation
                    .set_card_visual_state(id, VisualState::Unmatched);
            }
        }
        self.state.clear_selection();
        if self.phase.is_active() {
            self.state.board_locked = false;
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Level endings
    // ─────────────────────────────────────────────────────────────

    fn complete_level(&mut self) {
        self.stop_countdown();
        self.phase = LevelPhase::Resolving(Resolution::Won);
        self.presentation.trigger_celebration_effect();
        let delay = self.config.timing().level_complete_delay();
        self.schedule_level_timer(delay, GameTimer::ShowLevelComplete);
        info!(
            level = self.state.current_level_index + 1,
            score = self.state.score(),
            "Level complete"
        );
    }

    fn tick_countdown(&mut self) {
        if !self.phase.is_active() {
            return;
        }
        self.state.seconds_remaining = self.state.seconds_remaining.saturating_sub(1);
        self.presentation
            .update_timer_text(&format_clock(self.state.seconds_remaining));
        if self.state.seconds_remaining == 0 {
            self.expire_level();
        }
    }

    fn expire_level(&mut self) {
        self.stop_countdown();
        self.state.board_locked = true;
        self.phase = LevelPhase::Resolving(Resolution::TimedOut);
        self.presentation.show_timeout_notice();
        self.presentation
            .set_control_enabled(Control::NextLevel, true);
        info!(level = self.state.current_level_index + 1, "Time's up");
    }

    fn finish_game(&mut self) {
        self.phase = LevelPhase::AllLevelsComplete;
        self.state.board_locked = true;
        self.presentation
            .set_control_enabled(Control::NextLevel, false);
        self.presentation.set_control_enabled(Control::Hint, false);
        self.presentation
            .show_all_levels_complete_notice(self.state.score(), self.state.max_combo());
        info!(
            score = self.state.score(),
            max_combo = self.state.max_combo(),
            "All levels complete"
        );
    }

    fn has_next_level(&self) -> bool {
        self.state.current_level_index + 1 < self.config.levels().len()
    }

    // ─────────────────────────────────────────────────────────────
    //  Timers
    // ─────────────────────────────────────────────────────────────

    fn apply_decay(&mut self) {
        self.state.scoreboard.deduct(DECAY_PENALTY);
        self.presentation.update_score_text(self.state.score());
        debug!(score = self.state.score(), "Passive decay applied");
    }

    fn ensure_decay(&mut self) {
        if self.decay.is_none() {
            let period = self.config.timing().decay_interval();
            self.decay = Some(self.scheduler.schedule_every(period, GameTimer::DecayTick));
        }
    }

    fn stop_countdown(&mut self) {
        if let Some(id) = self.countdown.take() {
            self.scheduler.cancel(id);
        }
    }

    fn schedule_level_timer(&mut self, after: Duration, timer: GameTimer) {
        let id = self.scheduler.schedule_once(after, timer);
        self.level_timers.push(id);
    }

    fn cancel_level_timers(&mut self) {
        for id in self.level_timers.drain(..) {
            self.scheduler.cancel(id);
        }
    }
}

impl<P: Presentation> GameController<P, TimerQueue> {
    /// Advances the virtual clock, running each due timer in turn.
    #[instrument(skip(self), level = "trace")]
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(timer) = self.scheduler.pop_due(until) {
            self.on_timer(timer);
        }
        self.scheduler.settle_at(until);
    }
}
