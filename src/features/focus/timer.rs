//! The focus timer state machine.
//!
//! A [`FocusTimer`] is driven by two inputs only: clicks and once-a-second
//! ticks. Both must arrive on the same thread (see [`super::driver`]).

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use super::driver::PeriodicDriver;
use super::listener::FocusListener;
use super::state::{Phase, PlayState};
use crate::config::{SessionConfig, SessionState};
use crate::error::FocusError;

/// Length of the break that follows a completed focus session.
pub const BREAK_MINUTES: u32 = 5;

/// Two clicks closer together than this reset the timer.
pub const DOUBLE_CLICK_MS: i64 = 200;

/// A gap longer than this since the last activity starts a new day.
pub const DAILY_RESET_HOURS: i64 = 7;

/// Text shown while no countdown is active.
pub const IDLE_TEXT: &str = "Start Timer";

/// Format a second count as zero-padded `MM:SS`.
#[must_use]
pub fn format_mmss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Focus/break countdown with a persisted completed-session counter.
pub struct FocusTimer<L: FocusListener> {
    config: SessionConfig,
    listener: L,
    play_state: PlayState,
    phase: Phase,
    /// `None` exactly when idle.
    seconds_remaining: Option<u32>,
    /// Focus length captured when the current session started.
    current_session_minutes: u32,
    last_click: Option<DateTime<Utc>>,
    driver: Option<Box<dyn PeriodicDriver>>,
    reset_on_open: bool,
}

impl<L: FocusListener> FocusTimer<L> {
    /// Create an idle timer and run the daily reset check against the wall clock.
    pub fn new(config: SessionConfig, listener: L) -> Self {
        Self::new_at(config, listener, Utc::now())
    }

    /// Create an idle timer and run the daily reset check against `now`.
    pub fn new_at(config: SessionConfig, listener: L, now: DateTime<Utc>) -> Self {
        let current_session_minutes = config.load().focus_length_minutes;
        let mut timer = Self {
            config,
            listener,
            play_state: PlayState::Idle,
            phase: Phase::Work,
            seconds_remaining: None,
            current_session_minutes,
            last_click: None,
            driver: None,
            reset_on_open: false,
        };
        timer.reset_on_open = timer.daily_reset_check(now);
        info!(
            completed = timer.config.load().completed_session_count,
            "focus timer ready"
        );
        timer
    }

    /// Attach a periodic driver and start it, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to start; no driver is attached then.
    pub fn start(&mut self, mut driver: Box<dyn PeriodicDriver>) -> Result<(), FocusError> {
        self.stop();
        driver.start()?;
        self.driver = Some(driver);
        Ok(())
    }

    /// Stop and detach the periodic driver, if any.
    pub fn stop(&mut self) {
        if let Some(mut driver) = self.driver.take() {
            driver.stop();
        }
    }

    /// Whether a running driver is attached.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.driver.as_ref().is_some_and(|d| d.is_running())
    }

    /// Handle a click at `now`.
    ///
    /// A click within [`DOUBLE_CLICK_MS`] of the previous one abandons the
    /// current session without counting it. Otherwise the click starts,
    /// pauses or resumes the countdown.
    pub fn on_click(&mut self, now: DateTime<Utc>) {
        let double = self
            .last_click
            .is_some_and(|prev| now - prev < Duration::milliseconds(DOUBLE_CLICK_MS));

        if double {
            debug!(from = %self.play_state, phase = %self.phase, "double click, resetting");
            self.reset();
        } else {
            self.toggle();
        }

        self.listener.refresh();
        self.last_click = Some(now);
    }

    fn toggle(&mut self) {
        let next = match self.play_state {
            PlayState::Idle => {
                self.current_session_minutes = self.config.load().focus_length_minutes;
                self.seconds_remaining = Some(self.current_session_minutes.saturating_mul(60));
                PlayState::Running
            }
            PlayState::Running => PlayState::Paused,
            PlayState::Paused => PlayState::Running,
        };
        debug!(from = %self.play_state, to = %next, phase = %self.phase, "click");
        self.play_state = next;
    }

    fn reset(&mut self) {
        self.play_state = PlayState::Idle;
        self.phase = Phase::Work;
        self.seconds_remaining = None;
    }

    /// Advance the countdown by one second using the wall clock.
    pub fn on_tick(&mut self) {
        self.on_tick_at(Utc::now());
    }

    /// Advance the countdown by one second; `now` stamps a completed session.
    ///
    /// Does nothing unless the timer is running.
    pub fn on_tick_at(&mut self, now: DateTime<Utc>) {
        if self.play_state != PlayState::Running {
            return;
        }

        let remaining = self.seconds_remaining.unwrap_or(0).saturating_sub(1);
        self.seconds_remaining = Some(remaining);

        if remaining == 0 {
            match self.phase {
                Phase::Work => self.finish_focus(now),
                Phase::Break => self.finish_break(),
            }
        }

        self.listener.refresh();
    }

    fn finish_focus(&mut self, now: DateTime<Utc>) {
        self.listener.play_finish_sound();
        self.phase = Phase::Break;
        self.seconds_remaining = Some(BREAK_MINUTES * 60);
        self.listener.alert(&format!(
            "Focus Session Complete ({} mins)",
            self.current_session_minutes
        ));

        let state = self.config.load();
        let next = SessionState {
            completed_session_count: state.completed_session_count.saturating_add(1),
            last_activity: now,
            ..state
        };
        self.persist(next);
        info!(
            minutes = self.current_session_minutes,
            completed = next.completed_session_count,
            "focus session complete"
        );
    }

    fn finish_break(&mut self) {
        self.listener.play_finish_sound();
        self.reset();
        self.listener.alert("Break Done. Time to get back to work.");
        info!("break complete");
    }

    /// Zero the session count if more than [`DAILY_RESET_HOURS`] passed
    /// since the last recorded activity. Returns whether a reset happened.
    pub fn daily_reset_check(&mut self, now: DateTime<Utc>) -> bool {
        let state = self.config.load();
        if now - state.last_activity <= Duration::hours(DAILY_RESET_HOURS) {
            return false;
        }

        info!(
            previous = state.completed_session_count,
            "new day, resetting completed session count"
        );
        self.persist(SessionState {
            completed_session_count: 0,
            last_activity: now,
            ..state
        });
        true
    }

    fn persist(&mut self, state: SessionState) {
        if let Err(e) = self.config.save(state) {
            warn!(error = %e, "failed to persist session record");
        }
    }

    /// Status text: the idle prompt, or glyph, countdown and break marker.
    #[must_use]
    pub fn render_text(&self) -> String {
        match (self.play_state, self.seconds_remaining) {
            (PlayState::Idle, _) | (_, None) => IDLE_TEXT.to_string(),
            (state, Some(seconds)) => format!(
                "{}  {}{}",
                state.glyph(),
                format_mmss(seconds),
                self.phase.marker()
            ),
        }
    }

    /// Tooltip text with the completed-session count.
    #[must_use]
    pub fn render_tooltip(&self) -> String {
        let count = self.config.load().completed_session_count;
        format!(
            "Completed {count} session{}",
            if count == 1 { "" } else { "s" }
        )
    }

    /// Whether construction zeroed a count left over from a previous day.
    #[must_use]
    pub const fn reset_on_open(&self) -> bool {
        self.reset_on_open
    }

    /// Current play state.
    #[must_use]
    pub const fn play_state(&self) -> PlayState {
        self.play_state
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds left in the current phase, `None` while idle.
    #[must_use]
    pub const fn seconds_remaining(&self) -> Option<u32> {
        self.seconds_remaining
    }

    /// Focus length of the session in progress (or the last one started).
    #[must_use]
    pub const fn current_session_minutes(&self) -> u32 {
        self.current_session_minutes
    }

    /// The session record owner.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Mutable access for the settings input.
    ///
    /// A length change only applies to the next session.
    pub fn config_mut(&mut self) -> &mut SessionConfig {
        &mut self.config
    }

    /// The attached listener.
    #[must_use]
    pub const fn listener(&self) -> &L {
        &self.listener
    }

    /// Mutable access to the attached listener.
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }
}

impl<L: FocusListener> Drop for FocusTimer<L> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<L: FocusListener> std::fmt::Debug for FocusTimer<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusTimer")
            .field("play_state", &self.play_state)
            .field("phase", &self.phase)
            .field("seconds_remaining", &self.seconds_remaining)
            .field("current_session_minutes", &self.current_session_minutes)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryStore;
    use crate::features::focus::driver::Ticker;
    use crate::features::focus::listener::{EventQueue, FocusEvent, MockFocusListener};
    use chrono::TimeZone;
    use mockall::predicate::eq;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 10, 9, 0, 0).unwrap()
    }

    fn fresh_state() -> SessionState {
        SessionState {
            completed_session_count: 0,
            last_activity: t0(),
            focus_length_minutes: 25,
        }
    }

    fn timer_with(state: SessionState) -> (FocusTimer<EventQueue>, MemoryStore) {
        let store = MemoryStore::with_state(state);
        let config = SessionConfig::open(Box::new(store.clone())).unwrap();
        (FocusTimer::new_at(config, EventQueue::new(), t0()), store)
    }

    fn timer() -> FocusTimer<EventQueue> {
        timer_with(fresh_state()).0
    }

    fn at(ms: i64) -> DateTime<Utc> {
        t0() + Duration::milliseconds(ms)
    }

    fn tick_n<L: FocusListener>(timer: &mut FocusTimer<L>, n: u32) {
        for _ in 0..n {
            timer.on_tick_at(t0());
        }
    }

    #[test]
    fn test_initial_state() {
        let timer = timer();

        assert_eq!(timer.play_state(), PlayState::Idle);
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.seconds_remaining(), None);
        assert_eq!(timer.render_text(), "Start Timer");
    }

    #[test]
    fn test_single_clicks_cycle() {
        let mut timer = timer();

        timer.on_click(at(0));
        assert_eq!(timer.play_state(), PlayState::Running);
        assert_eq!(timer.seconds_remaining(), Some(1500));

        let expected = [
            PlayState::Paused,
            PlayState::Running,
            PlayState::Paused,
            PlayState::Running,
        ];
        for (i, state) in (1..).zip(expected) {
            timer.on_click(at(i * 200));
            assert_eq!(timer.play_state(), state);
        }
    }

    #[test]
    fn test_click_requests_refresh() {
        let mut timer = timer();
        timer.on_click(at(0));

        assert_eq!(timer.listener_mut().drain(), vec![FocusEvent::Refresh]);
    }

    #[test]
    fn test_double_click_resets_from_any_state() {
        let mut timer = timer();

        timer.on_click(at(0));
        timer.on_click(at(150));
        assert_eq!(timer.play_state(), PlayState::Idle);
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.seconds_remaining(), None);

        // Paused, then fast double click
        timer.on_click(at(1_000));
        timer.on_click(at(2_000));
        assert_eq!(timer.play_state(), PlayState::Paused);
        timer.on_click(at(2_199));
        assert_eq!(timer.play_state(), PlayState::Idle);
        assert_eq!(timer.render_text(), "Start Timer");
    }

    #[test]
    fn test_double_click_during_break_does_not_count() {
        let (mut timer, store) = timer_with(fresh_state());
        timer.on_click(at(0));
        tick_n(&mut timer, 1500);
        assert_eq!(timer.phase(), Phase::Break);

        timer.on_click(at(10_000));
        timer.on_click(at(10_050));

        assert_eq!(timer.play_state(), PlayState::Idle);
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(store.snapshot().unwrap().completed_session_count, 1);
    }

    #[test]
    fn test_abandoned_session_is_not_counted() {
        let (mut timer, store) = timer_with(fresh_state());
        timer.on_click(at(0));
        tick_n(&mut timer, 1000);
        timer.on_click(at(5_000));
        timer.on_click(at(5_100));

        assert_eq!(timer.config().load().completed_session_count, 0);
        assert_eq!(store.snapshot().unwrap().completed_session_count, 0);
    }

    #[test]
    fn test_tick_is_noop_unless_running() {
        let mut timer = timer();
        timer.on_tick_at(t0());
        assert_eq!(timer.seconds_remaining(), None);
        assert!(timer.listener().is_empty());

        timer.on_click(at(0));
        timer.on_click(at(500));
        timer.listener_mut().drain();

        tick_n(&mut timer, 10);
        assert_eq!(timer.play_state(), PlayState::Paused);
        assert_eq!(timer.seconds_remaining(), Some(1500));
        assert!(timer.listener().is_empty());
    }

    #[test]
    fn test_tick_counts_down() {
        let mut timer = timer();
        timer.on_click(at(0));
        tick_n(&mut timer, 3);

        assert_eq!(timer.seconds_remaining(), Some(1497));
        assert_eq!(timer.listener_mut().drain(), vec![FocusEvent::Refresh]);
    }

    #[test]
    fn test_full_focus_session() {
        let (mut timer, store) = timer_with(fresh_state());
        let finished = t0() + Duration::minutes(25);

        timer.on_click(at(0));
        tick_n(&mut timer, 1499);
        assert_eq!(timer.phase(), Phase::Work);
        timer.on_tick_at(finished);

        assert_eq!(timer.phase(), Phase::Break);
        assert_eq!(timer.play_state(), PlayState::Running);
        assert_eq!(timer.seconds_remaining(), Some(300));

        let events = timer.listener_mut().drain();
        let sounds = events.iter().filter(|e| **e == FocusEvent::FinishSound).count();
        let alerts: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                FocusEvent::Alert(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(sounds, 1);
        assert_eq!(alerts, vec!["Focus Session Complete (25 mins)"]);

        let saved = store.snapshot().unwrap();
        assert_eq!(saved.completed_session_count, 1);
        assert_eq!(saved.last_activity, finished);
    }

    #[test]
    fn test_stored_zero_length_does_not_finish_instantly() {
        let (mut timer, _store) = timer_with(SessionState {
            focus_length_minutes: 0,
            ..fresh_state()
        });

        timer.on_click(at(0));
        timer.on_tick_at(t0());

        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.seconds_remaining(), Some(25 * 60 - 1));
        assert_eq!(timer.config().load().completed_session_count, 0);
        assert!(!timer
            .listener_mut()
            .drain()
            .iter()
            .any(|e| matches!(e, FocusEvent::Alert(_))));
    }

    #[test]
    fn test_full_break_returns_to_idle() {
        let mut timer = timer();
        timer.on_click(at(0));
        tick_n(&mut timer, 1500);
        timer.listener_mut().drain();

        tick_n(&mut timer, 299);
        assert_eq!(timer.phase(), Phase::Break);
        tick_n(&mut timer, 1);

        assert_eq!(timer.play_state(), PlayState::Idle);
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.seconds_remaining(), None);
        assert_eq!(
            timer.listener_mut().drain(),
            vec![
                FocusEvent::Refresh,
                FocusEvent::FinishSound,
                FocusEvent::Alert("Break Done. Time to get back to work.".to_string()),
                FocusEvent::Refresh,
            ]
        );
        assert_eq!(timer.config().load().completed_session_count, 1);
    }

    #[test]
    fn test_cues_with_mock_listener() {
        let mut listener = MockFocusListener::new();
        listener.expect_refresh().times(1500 + 1).return_const(());
        listener.expect_play_finish_sound().times(1).return_const(());
        listener
            .expect_alert()
            .with(eq("Focus Session Complete (25 mins)"))
            .times(1)
            .return_const(());

        let config = SessionConfig::open(Box::new(MemoryStore::with_state(fresh_state()))).unwrap();
        let mut timer = FocusTimer::new_at(config, listener, t0());
        timer.on_click(at(0));
        tick_n(&mut timer, 1500);

        timer.listener_mut().checkpoint();
    }

    #[test]
    fn test_length_change_mid_session_keeps_countdown() {
        let mut timer = timer();
        timer.on_click(at(0));
        tick_n(&mut timer, 10);

        timer.config_mut().set_focus_length(50).unwrap();
        assert_eq!(timer.seconds_remaining(), Some(1490));
        assert_eq!(timer.current_session_minutes(), 25);

        tick_n(&mut timer, 1490);
        let alerts: Vec<_> = timer
            .listener_mut()
            .drain()
            .into_iter()
            .filter(|e| matches!(e, FocusEvent::Alert(_)))
            .collect();
        assert_eq!(
            alerts,
            vec![FocusEvent::Alert("Focus Session Complete (25 mins)".to_string())]
        );

        // The next session picks up the new length
        tick_n(&mut timer, 300);
        timer.on_click(at(60_000));
        assert_eq!(timer.seconds_remaining(), Some(3000));
        assert_eq!(timer.current_session_minutes(), 50);
    }

    #[test]
    fn test_render_text() {
        let mut timer = timer();
        timer.config_mut().set_focus_length(1).unwrap();
        timer.on_click(at(0));
        assert_eq!(timer.render_text(), "||  01:00");

        timer.on_click(at(1_000));
        assert_eq!(timer.render_text(), "▶  01:00");
    }

    #[test]
    fn test_render_text_sixty_five_seconds() {
        let mut timer = timer();
        timer.config_mut().set_focus_length(2).unwrap();
        timer.on_click(at(0));
        tick_n(&mut timer, 55);

        assert_eq!(timer.seconds_remaining(), Some(65));
        assert!(timer.render_text().contains("01:05"));
    }

    #[test]
    fn test_render_text_break_marker() {
        let mut timer = timer();
        timer.config_mut().set_focus_length(1).unwrap();
        timer.on_click(at(0));
        tick_n(&mut timer, 60);

        assert_eq!(timer.render_text(), "||  05:00★");
    }

    #[test]
    fn test_render_tooltip_plural() {
        let (mut timer, _) = timer_with(SessionState {
            completed_session_count: 1,
            ..fresh_state()
        });
        assert_eq!(timer.render_tooltip(), "Completed 1 session");

        timer.config_mut().reset_count(t0()).unwrap();
        assert_eq!(timer.render_tooltip(), "Completed 0 sessions");

        let (timer, _) = timer_with(SessionState {
            completed_session_count: 4,
            ..fresh_state()
        });
        assert_eq!(timer.render_tooltip(), "Completed 4 sessions");
    }

    #[test]
    fn test_daily_reset_after_eight_hours() {
        let (timer, store) = timer_with(SessionState {
            completed_session_count: 5,
            last_activity: t0() - Duration::hours(8),
            focus_length_minutes: 25,
        });

        let saved = store.snapshot().unwrap();
        assert_eq!(saved.completed_session_count, 0);
        assert_eq!(saved.last_activity, t0());
        assert!(timer.reset_on_open());
    }

    #[test]
    fn test_no_daily_reset_after_six_hours() {
        let before = SessionState {
            completed_session_count: 5,
            last_activity: t0() - Duration::hours(6),
            focus_length_minutes: 25,
        };
        let (mut timer, store) = timer_with(before);

        assert_eq!(store.snapshot(), Some(before));
        assert!(!timer.reset_on_open());
        assert!(!timer.daily_reset_check(t0()));
        assert_eq!(timer.config().load().completed_session_count, 5);
    }

    #[test]
    fn test_daily_reset_boundary_is_exclusive() {
        let (mut timer, _) = timer_with(SessionState {
            completed_session_count: 2,
            ..fresh_state()
        });

        assert!(!timer.daily_reset_check(t0() + Duration::hours(7)));
        assert!(timer.daily_reset_check(t0() + Duration::hours(7) + Duration::seconds(1)));
        assert_eq!(timer.config().load().completed_session_count, 0);
    }

    #[test]
    fn test_default_record_resets_on_first_start() {
        let store = MemoryStore::new();
        let config = SessionConfig::open(Box::new(store.clone())).unwrap();
        let _timer = FocusTimer::new_at(config, EventQueue::new(), t0());

        assert_eq!(store.snapshot().unwrap().last_activity, t0());
    }

    #[test]
    fn test_start_and_stop_driver() {
        let mut timer = timer();
        assert!(!timer.is_ticking());

        let (ticker, _ticks) = Ticker::channel(std::time::Duration::from_millis(50));
        timer.start(Box::new(ticker)).unwrap();
        assert!(timer.is_ticking());

        timer.stop();
        timer.stop();
        assert!(!timer.is_ticking());
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(65), "01:05");
        assert_eq!(format_mmss(1500), "25:00");
        assert_eq!(format_mmss(7200), "120:00");
    }
}
