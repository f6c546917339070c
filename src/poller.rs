//! Refresh Job Polling
//!
//! Two-phase state machine over polled job status. The only side effect tied
//! to a transition is the page reload when a running job goes idle, which is
//! how freshly computed report data reaches the browser.

use std::time::Duration;

use crate::api::ApiError;
use crate::models::JobStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobPhase {
    #[default]
    Idle,
    Running,
}

impl JobPhase {
    fn of(status: &JobStatus) -> Self {
        if status.is_updating {
            JobPhase::Running
        } else {
            JobPhase::Idle
        }
    }
}

/// Status overlay, refresh button and "last updated" label
pub trait StatusView {
    fn render(&mut self, status: &JobStatus);
    /// Disable the refresh button and show its busy label, or restore it
    fn set_refresh_busy(&mut self, busy: bool);
}

pub trait PageNavigator {
    fn reload(&self);
}

/// Periodic task runner
pub trait Scheduler {
    fn every(&self, period: Duration, task: Box<dyn FnMut()>);
}

/// Run `tick` once now, then on every period
pub fn start_polling<S: Scheduler>(scheduler: &S, period: Duration, mut tick: impl FnMut() + 'static) {
    tick();
    scheduler.every(period, Box::new(tick));
}

#[derive(Debug, Default)]
pub struct StatusPoller {
    phase: JobPhase,
    refresh_in_flight: bool,
}

impl StatusPoller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> JobPhase {
        self.phase
    }

    pub fn refresh_in_flight(&self) -> bool {
        self.refresh_in_flight
    }

    /// Reconcile one poll result with the page.
    /// Failed polls are logged and leave both the page and the phase untouched.
    pub fn handle<V: StatusView, N: PageNavigator>(
        &mut self,
        result: Result<JobStatus, ApiError>,
        view: &mut V,
        navigator: &N,
    ) {
        let status = match result {
            Ok(status) => status,
            Err(e) => {
                log::error!("[POLL] Status check failed: {}", e);
                return;
            }
        };

        view.render(&status);
        if self.refresh_in_flight {
            view.set_refresh_busy(true);
        }

        let next = JobPhase::of(&status);
        if next != self.phase {
            log::info!("[POLL] Job phase {:?} -> {:?}", self.phase, next);
        }
        let finished = self.phase == JobPhase::Running && next == JobPhase::Idle;
        self.phase = next;

        if finished {
            navigator.reload();
        }
    }

    /// A manual refresh was accepted: show the busy state without waiting for the next poll
    pub fn mark_running<V: StatusView>(&mut self, view: &mut V) {
        view.render(&JobStatus::updating());
        self.phase = JobPhase::Running;
    }

    /// Claim the refresh button for one request.
    /// Returns false while an earlier request is still in flight.
    pub fn refresh_requested<V: StatusView>(&mut self, view: &mut V) -> bool {
        if self.refresh_in_flight {
            return false;
        }
        self.refresh_in_flight = true;
        view.set_refresh_busy(true);
        true
    }

    /// Release the refresh button once the request settles
    pub fn refresh_finished<V: StatusView>(&mut self, accepted: bool, view: &mut V) {
        self.refresh_in_flight = false;
        if accepted {
            self.mark_running(view);
        } else {
            view.set_refresh_busy(self.phase == JobPhase::Running);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingView {
        rendered: Vec<JobStatus>,
        busy: Vec<bool>,
    }

    impl StatusView for RecordingView {
        fn render(&mut self, status: &JobStatus) {
            self.rendered.push(status.clone());
        }
        fn set_refresh_busy(&mut self, busy: bool) {
            self.busy.push(busy);
        }
    }

    #[derive(Default)]
    struct CountingNavigator {
        reloads: Cell<usize>,
    }

    impl PageNavigator for CountingNavigator {
        fn reload(&self) {
            self.reloads.set(self.reloads.get() + 1);
        }
    }

    #[derive(Default)]
    struct ManualScheduler {
        task: RefCell<Option<(Duration, Box<dyn FnMut()>)>>,
    }

    impl ManualScheduler {
        fn fire(&self) {
            if let Some((_, task)) = self.task.borrow_mut().as_mut() {
                task();
            }
        }
    }

    impl Scheduler for ManualScheduler {
        fn every(&self, period: Duration, task: Box<dyn FnMut()>) {
            *self.task.borrow_mut() = Some((period, task));
        }
    }

    fn status(is_updating: bool) -> Result<JobStatus, ApiError> {
        Ok(JobStatus { is_updating, ..Default::default() })
    }

    /// Feed a sequence of poll results, returning the reload count after each one
    fn run(sequence: &[Result<JobStatus, ApiError>]) -> Vec<usize> {
        let mut poller = StatusPoller::new();
        let mut view = RecordingView::default();
        let navigator = CountingNavigator::default();
        sequence
            .iter()
            .map(|result| {
                poller.handle(result.clone(), &mut view, &navigator);
                navigator.reloads.get()
            })
            .collect()
    }

    #[test]
    fn test_reload_only_when_running_job_finishes() {
        assert_eq!(run(&[status(true), status(true), status(false)]), vec![0, 0, 1]);
    }

    #[test]
    fn test_no_reload_while_idle() {
        assert_eq!(run(&[status(false), status(false)]), vec![0, 0]);
        assert_eq!(run(&[status(true)]), vec![0]);
    }

    #[test]
    fn test_failed_poll_keeps_phase_and_page() {
        let failure = Err(ApiError::Transport("offline".into()));
        assert_eq!(run(&[status(true), failure.clone(), status(false)]), vec![0, 0, 1]);

        let mut poller = StatusPoller::new();
        let mut view = RecordingView::default();
        let navigator = CountingNavigator::default();
        poller.handle(status(true), &mut view, &navigator);
        poller.handle(failure, &mut view, &navigator);
        assert_eq!(poller.phase(), JobPhase::Running);
        assert_eq!(view.rendered.len(), 1);
    }

    #[test]
    fn test_every_successful_poll_is_rendered() {
        let mut poller = StatusPoller::new();
        let mut view = RecordingView::default();
        let navigator = CountingNavigator::default();
        let labelled = JobStatus {
            is_updating: false,
            last_updated_str: Some("09:00".into()),
            ..Default::default()
        };

        poller.handle(Ok(labelled.clone()), &mut view, &navigator);
        poller.handle(status(true), &mut view, &navigator);

        assert_eq!(view.rendered, vec![labelled, JobStatus::updating()]);
    }

    #[test]
    fn test_manual_refresh_then_idle_reloads() {
        let mut poller = StatusPoller::new();
        let mut view = RecordingView::default();
        let navigator = CountingNavigator::default();

        poller.mark_running(&mut view);
        assert_eq!(view.rendered, vec![JobStatus::updating()]);
        assert_eq!(poller.phase(), JobPhase::Running);

        poller.handle(status(false), &mut view, &navigator);
        assert_eq!(navigator.reloads.get(), 1);
        assert_eq!(poller.phase(), JobPhase::Idle);
    }

    #[test]
    fn test_refresh_button_is_held_while_request_in_flight() {
        let mut poller = StatusPoller::new();
        let mut view = RecordingView::default();

        assert!(poller.refresh_requested(&mut view));
        assert!(!poller.refresh_requested(&mut view));
        assert!(poller.refresh_in_flight());
        assert_eq!(view.busy, vec![true]);

        poller.refresh_finished(true, &mut view);
        assert!(!poller.refresh_in_flight());
        assert_eq!(poller.phase(), JobPhase::Running);
        assert_eq!(view.rendered, vec![JobStatus::updating()]);
    }

    #[test]
    fn test_rejected_refresh_restores_button() {
        let mut poller = StatusPoller::new();
        let mut view = RecordingView::default();

        assert!(poller.refresh_requested(&mut view));
        poller.refresh_finished(false, &mut view);

        assert_eq!(view.busy, vec![true, false]);
        assert_eq!(poller.phase(), JobPhase::Idle);
        assert!(view.rendered.is_empty());
        assert!(poller.refresh_requested(&mut view));
    }

    #[test]
    fn test_idle_poll_during_refresh_keeps_button_busy() {
        let mut poller = StatusPoller::new();
        let mut view = RecordingView::default();
        let navigator = CountingNavigator::default();

        poller.refresh_requested(&mut view);
        poller.handle(status(false), &mut view, &navigator);

        assert_eq!(view.busy, vec![true, true]);
        assert_eq!(navigator.reloads.get(), 0);
    }

    #[test]
    fn test_start_polling_ticks_immediately_then_on_schedule() {
        let scheduler = ManualScheduler::default();
        let ticks = Rc::new(Cell::new(0));
        let counter = ticks.clone();

        start_polling(&scheduler, Duration::from_millis(5000), move || counter.set(counter.get() + 1));
        assert_eq!(ticks.get(), 1);
        assert_eq!(
            scheduler.task.borrow().as_ref().map(|(period, _)| *period),
            Some(Duration::from_millis(5000))
        );

        scheduler.fire();
        scheduler.fire();
        assert_eq!(ticks.get(), 3);
    }
}
