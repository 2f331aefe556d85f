//! Discrete-event slot scheduler.
//!
//! # Algorithm
//!
//! Every mutating operation runs "advance to `t`; mutate; advance to `t`".
//! Advancing the clock to `t` is the single place where the schedule changes:
//!
//! 1. **Settle**: pop timetable entries with `eta <= t`, mark them completed,
//!    report them in `(eta, flight)` order.
//! 2. **Promote**: every scheduled flight with `start <= t` becomes in
//!    progress. From here on it is never moved.
//! 3. **Demote**: every flight still scheduled goes back to the pending
//!    queue with its current priority and original submit time; its old ETA
//!    is remembered. In-progress flights pin their runway until their ETA.
//! 4. **Rebuild pool**: each runway is free at `t` or at its pinned ETA.
//! 5. **Re-pack**: pop the best pending flight, pop the earliest runway
//!    (lowest id on ties), `start = max(t, free_at)`, `eta = start + duration`.
//! 6. **Report**: first-time slots as `Scheduled`; demoted flights whose ETA
//!    moved as one `EtasUpdated` batch sorted by id; unchanged ETAs silently.
//!
//! Re-advancing to the same `t` with no mutation in between reproduces the
//! same assignment, so the second advance reports nothing.
//!
//! # Complexity
//! Per advance: O(p log p) for the re-pack over `p` unsatisfied flights,
//! plus O(a) per timetable deletion over `a` slot holders.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use std::collections::{BTreeMap, HashMap};

use log::{debug, info, trace};

use super::pool::RunwayPool;
use super::query::ScheduledWindow;
use super::registry::{AirlineIndex, Location, Registry};
use super::SchedulerConfig;
use crate::error::{Action, Rejection, SchedulerError};
use crate::heap::{MinHeap, PairingHeap};
use crate::models::{
    ActiveFlight, AirlineId, Assignment, Event, EventLog, FlightId, FlightRequest, FlightState,
    PendingFlight, Priority, RunwayId, Schedule, Time, TimetableEntry,
};

/// Greedy, priority-ordered runway slot scheduler.
///
/// Owns the pending queue, the active set, the completion timetable, the
/// runway pool, the airline index and the registry tying them together.
/// All operations take `&mut self` and run to completion; a multi-threaded
/// host must guard the whole scheduler with one lock.
///
/// # Example
///
/// ```
/// use u_slot::models::Event;
/// use u_slot::scheduler::SlotScheduler;
///
/// let mut scheduler = SlotScheduler::new();
/// scheduler.initialize(1);
///
/// let log = scheduler.submit(1, 100, 0, 5, 10).unwrap();
/// assert_eq!(log.scheduled(), vec![(1, 10)]);
///
/// let log = scheduler.submit(2, 100, 0, 9, 4).unwrap();
/// // Flight 1 started at t=0 and keeps the runway; flight 2 waits for it.
/// assert_eq!(log.scheduled(), vec![(2, 14)]);
///
/// let log = scheduler.advance_time(10).unwrap();
/// assert_eq!(log.events, vec![Event::Landed { flight: 1, at: 10 }]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlotScheduler {
    now: Time,
    pool: RunwayPool,
    pending: PairingHeap<PendingFlight>,
    active: HashMap<FlightId, ActiveFlight>,
    timetable: MinHeap<TimetableEntry>,
    airlines: AirlineIndex,
    registry: Registry,
}

impl SlotScheduler {
    /// Creates a scheduler with no runways at time 0.
    ///
    /// Flights submitted before any runway exists stay pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler from a configuration and seeds its runways.
    ///
    /// The returned log holds the initialization event (or its rejection).
    pub fn from_config(config: &SchedulerConfig) -> (Self, EventLog) {
        let mut scheduler = Self {
            now: config.start_time,
            ..Self::default()
        };
        let log = scheduler.initialize(config.runway_count);
        (scheduler, log)
    }

    /// Seeds `runway_count` idle runways at the current clock.
    ///
    /// Rejects non-positive counts, and any call once runways exist, leaving
    /// the scheduler untouched. Flights submitted before the first runway
    /// keep waiting and are packed at the next advance.
    pub fn initialize(&mut self, runway_count: i32) -> EventLog {
        let mut log = EventLog::new();
        if runway_count <= 0 {
            return self.reject(
                log,
                Rejection::InvalidInitialRunwayCount {
                    count: runway_count,
                },
            );
        }
        if !self.pool.is_empty() {
            return self.reject(
                log,
                Rejection::AlreadyInitialized {
                    runways: self.pool.len(),
                },
            );
        }

        self.pool.add(runway_count.unsigned_abs(), self.now);
        info!("initialized {runway_count} runways at t={}", self.now);
        log.push(Event::RunwaysInitialized {
            count: runway_count,
        });
        log
    }

    // ======================== Operations ========================

    /// Admits a new flight and re-packs the schedule at `submit_time`.
    pub fn submit(
        &mut self,
        flight: FlightId,
        airline: AirlineId,
        submit_time: Time,
        priority: Priority,
        duration: Time,
    ) -> Result<EventLog, SchedulerError> {
        self.submit_request(FlightRequest {
            flight,
            airline,
            submit_time,
            priority,
            duration,
        })
    }

    /// Admits a prepared request. See [`submit`](Self::submit).
    pub fn submit_request(&mut self, request: FlightRequest) -> Result<EventLog, SchedulerError> {
        let at = request.submit_time;
        let mut log = EventLog::new();
        self.tick(at, &mut log)?;

        let flight = request.flight;
        if self.registry.contains(flight) {
            return Ok(self.reject(log, Rejection::DuplicateFlight { flight }));
        }
        if at.checked_add(request.duration).is_none() {
            return Ok(self.reject(log, Rejection::TimeOverflow { flight }));
        }

        let airline = request.airline;
        let handle = self.pending.push(PendingFlight::from_request(request));
        self.registry.admit(flight, at, handle);
        self.airlines.insert(airline, flight);
        trace!("admitted flight {flight} (airline {airline}) at t={at}");

        self.tick(at, &mut log)?;
        Ok(log)
    }

    /// Advances the clock to `time`, settling and re-packing.
    ///
    /// Times earlier than the current clock are accepted and simply
    /// recompute the schedule at that time.
    pub fn advance_time(&mut self, time: Time) -> Result<EventLog, SchedulerError> {
        let mut log = EventLog::new();
        self.tick(time, &mut log)?;
        Ok(log)
    }

    /// Withdraws a pending or scheduled flight.
    pub fn cancel(&mut self, flight: FlightId, time: Time) -> Result<EventLog, SchedulerError> {
        let mut log = EventLog::new();
        self.tick(time, &mut log)?;

        if let Err(rejection) = self.check_mutable(flight, Action::Cancel) {
            return Ok(self.reject(log, rejection));
        }
        self.withdraw(flight)?;
        log.push(Event::Canceled { flight });

        self.tick(time, &mut log)?;
        Ok(log)
    }

    /// Changes the priority of a pending or scheduled flight.
    ///
    /// A pending flight is re-keyed in the queue. A scheduled flight only has
    /// its stored priority updated; it takes effect when the re-pack in the
    /// trailing advance demotes the flight.
    pub fn reprioritize(
        &mut self,
        flight: FlightId,
        time: Time,
        priority: Priority,
    ) -> Result<EventLog, SchedulerError> {
        let mut log = EventLog::new();
        self.tick(time, &mut log)?;

        let location = match self.check_mutable(flight, Action::Reprioritize) {
            Ok(location) => location,
            Err(rejection) => return Ok(self.reject(log, rejection)),
        };
        match location {
            Location::Queued(handle) => {
                let queued = self.pending.get(handle).cloned().ok_or(handle.stale())?;
                let handle = self
                    .pending
                    .change_key(handle, queued.with_priority(priority))?;
                self.registry.relocate(flight, Location::Queued(handle))?;
            }
            Location::Scheduled(_) => {
                let active = self
                    .active
                    .get_mut(&flight)
                    .ok_or(SchedulerError::RegistryDesync {
                        flight,
                        expected: FlightState::Scheduled,
                    })?;
                active.request.priority = priority;
            }
            Location::InProgress(_) | Location::Completed => {
                return Err(SchedulerError::RegistryDesync {
                    flight,
                    expected: FlightState::Scheduled,
                })
            }
        }
        log.push(Event::Reprioritized { flight, priority });

        self.tick(time, &mut log)?;
        Ok(log)
    }

    /// Cancels every unsatisfied flight of the airlines in `[low, high]`.
    ///
    /// Flights already in progress are not affected.
    pub fn ground_hold(
        &mut self,
        low: AirlineId,
        high: AirlineId,
        time: Time,
    ) -> Result<EventLog, SchedulerError> {
        let mut log = EventLog::new();
        self.tick(time, &mut log)?;

        if high < low {
            return Ok(self.reject(log, Rejection::InvalidAirlineRange { low, high }));
        }
        let grounded = self.airlines.in_range(low, high);
        for &(_, flight) in &grounded {
            self.withdraw(flight)?;
        }
        info!(
            "ground hold [{low}, {high}] at t={time}: {} flights removed",
            grounded.len()
        );
        log.push(Event::GroundHeld { low, high });

        self.tick(time, &mut log)?;
        Ok(log)
    }

    /// Appends `count` runways, free from `time`.
    pub fn add_runways(&mut self, count: i32, time: Time) -> Result<EventLog, SchedulerError> {
        let mut log = EventLog::new();
        self.tick(time, &mut log)?;

        if count <= 0 {
            return Ok(self.reject(log, Rejection::InvalidRunwayCount { count }));
        }
        let ids = self.pool.add(count.unsigned_abs(), time);
        info!("runways {}..={} available from t={time}", ids.start(), ids.end());
        log.push(Event::RunwaysAdded { count });

        self.tick(time, &mut log)?;
        Ok(log)
    }

    // ======================== Queries ========================

    /// Scheduled, not yet started flights with ETA in `[from, to]`,
    /// ordered by ETA then id.
    pub fn scheduled_between(&self, from: Time, to: Time) -> ScheduledWindow {
        let mut hits: Vec<TimetableEntry> = self
            .timetable
            .iter()
            .filter(|e| from <= e.eta && e.eta <= to)
            .filter(|e| self.registry.state(e.flight) == Some(FlightState::Scheduled))
            .filter(|e| {
                self.active
                    .get(&e.flight)
                    .is_some_and(|a| !a.has_started(self.now))
            })
            .copied()
            .collect();
        hits.sort_unstable();
        ScheduledWindow::new(from, to, hits.into_iter().map(|e| e.flight).collect())
    }

    /// Every slot holder (scheduled or in progress), ordered by flight id.
    pub fn active_flights(&self) -> Vec<Assignment> {
        let mut out: Vec<Assignment> = self
            .active
            .iter()
            .map(|(&flight, a)| {
                let state = self
                    .registry
                    .state(flight)
                    .unwrap_or(FlightState::Scheduled);
                Assignment::new(flight, a.request.airline, a.runway, a.start, a.eta)
                    .with_state(state)
            })
            .collect();
        out.sort_unstable_by_key(|a| a.flight);
        out
    }

    /// Detached copy of the current schedule.
    pub fn snapshot(&self) -> Schedule {
        let mut schedule = Schedule::new(self.now, self.pool.len());
        schedule.assignments = self.active_flights();
        let mut pending: Vec<FlightId> = self.pending.iter().map(|p| p.flight).collect();
        pending.sort_unstable();
        schedule.pending = pending;
        schedule
    }

    /// Current clock.
    pub fn now(&self) -> Time {
        self.now
    }

    /// Number of runways.
    pub fn runway_count(&self) -> u32 {
        self.pool.len()
    }

    /// Lifecycle state of a flight, `None` if unknown or canceled.
    pub fn state(&self, flight: FlightId) -> Option<FlightState> {
        self.registry.state(flight)
    }

    /// Slot of a scheduled or in-progress flight.
    pub fn slot(&self, flight: FlightId) -> Option<&ActiveFlight> {
        self.active.get(&flight)
    }

    /// Flights waiting in the queue.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Unsatisfied flights of an airline, ascending.
    pub fn unsatisfied_flights(&self, airline: AirlineId) -> Vec<FlightId> {
        self.airlines.flights(airline)
    }

    // ======================== Time advance ========================

    fn tick(&mut self, now: Time, log: &mut EventLog) -> Result<(), SchedulerError> {
        self.now = now;
        let landed = self.settle_completions(now, log)?;
        self.promote_started(now)?;
        let (previous_etas, busy_until) = self.demote_unstarted()?;
        self.pool.rebuild(now, &busy_until);
        let (scheduled, updated) = self.repack(now, previous_etas, log)?;
        debug!(
            "advance to t={now}: {landed} landed, {scheduled} scheduled, {updated} re-timed, {} holding slots",
            self.active.len()
        );
        Ok(())
    }

    fn settle_completions(&mut self, now: Time, log: &mut EventLog) -> Result<usize, SchedulerError> {
        let mut landed = Vec::new();
        while !self.timetable.is_empty() && self.timetable.peek_min()?.eta <= now {
            let entry = self.timetable.pop_min()?;
            let flight = self
                .active
                .remove(&entry.flight)
                .ok_or(SchedulerError::RegistryDesync {
                    flight: entry.flight,
                    expected: FlightState::InProgress,
                })?;
            self.airlines.remove(flight.request.airline, entry.flight);
            self.registry.relocate(entry.flight, Location::Completed)?;
            landed.push((entry.eta, entry.flight));
        }

        landed.sort_unstable();
        for &(at, flight) in &landed {
            log.push(Event::Landed { flight, at });
        }
        Ok(landed.len())
    }

    fn promote_started(&mut self, now: Time) -> Result<(), SchedulerError> {
        for (&flight, active) in &self.active {
            if !active.has_started(now) {
                continue;
            }
            let location = self.registry.get(flight).map(|e| e.location);
            if let Some(Location::Scheduled(entry)) = location {
                self.registry.relocate(flight, Location::InProgress(entry))?;
                self.airlines.remove(active.request.airline, flight);
                trace!("flight {flight} departed on runway {}", active.runway);
            }
        }
        Ok(())
    }

    /// Returns `(previous ETA per demoted flight, busy-until per pinned runway)`.
    fn demote_unstarted(
        &mut self,
    ) -> Result<(HashMap<FlightId, Time>, HashMap<RunwayId, Time>), SchedulerError> {
        let mut previous_etas = HashMap::new();
        let mut busy_until = HashMap::new();

        for (&flight, active) in &self.active {
            let entry = self
                .registry
                .get(flight)
                .copied()
                .ok_or(SchedulerError::RegistryDesync {
                    flight,
                    expected: FlightState::Scheduled,
                })?;
            match entry.location {
                Location::Scheduled(slot) => {
                    if !self.timetable.remove(&slot) {
                        return Err(SchedulerError::MissingTimetableEntry { flight });
                    }
                    let handle = self.pending.push(PendingFlight {
                        submit_time: entry.submit_time,
                        ..PendingFlight::from_request(active.request.clone())
                    });
                    self.registry.relocate(flight, Location::Queued(handle))?;
                    previous_etas.insert(flight, active.eta);
                }
                Location::InProgress(_) => {
                    busy_until.insert(active.runway, active.eta);
                }
                Location::Queued(_) | Location::Completed => {
                    return Err(SchedulerError::RegistryDesync {
                        flight,
                        expected: FlightState::Scheduled,
                    })
                }
            }
        }

        self.active
            .retain(|flight, _| !previous_etas.contains_key(flight));
        Ok((previous_etas, busy_until))
    }

    /// Returns `(newly scheduled, re-timed)` counts.
    fn repack(
        &mut self,
        now: Time,
        mut previous_etas: HashMap<FlightId, Time>,
        log: &mut EventLog,
    ) -> Result<(usize, usize), SchedulerError> {
        if self.pool.is_empty() {
            return Ok((0, 0));
        }

        let mut scheduled = 0;
        let mut updated = BTreeMap::new();
        let mut unplaceable = Vec::new();
        while !self.pending.is_empty() {
            let next = self.pending.pop_max()?;
            let runway = self.pool.acquire()?;
            let start = runway.start_at(now);
            let Some(eta) = start.checked_add(next.request.duration) else {
                self.pool.release(runway.runway, runway.available_at);
                debug!("flight {} cannot end after t={start}; left pending", next.flight);
                unplaceable.push(next);
                continue;
            };
            self.pool.release(runway.runway, eta);

            let flight = next.flight;
            let entry = TimetableEntry {
                eta,
                flight,
                runway: runway.runway,
            };
            self.timetable.push(entry);
            self.registry.relocate(flight, Location::Scheduled(entry))?;
            self.active.insert(
                flight,
                ActiveFlight {
                    runway: runway.runway,
                    start,
                    eta,
                    request: next.request,
                },
            );
            trace!("flight {flight} -> runway {} [{start}, {eta})", runway.runway);

            match previous_etas.remove(&flight) {
                None => {
                    scheduled += 1;
                    log.push(Event::Scheduled { flight, eta });
                }
                Some(previous) if previous != eta => {
                    updated.insert(flight, eta);
                }
                Some(_) => {}
            }
        }

        for waiting in unplaceable {
            let flight = waiting.flight;
            let handle = self.pending.push(waiting);
            self.registry.relocate(flight, Location::Queued(handle))?;
        }

        let retimed = updated.len();
        if !updated.is_empty() {
            log.push(Event::EtasUpdated(updated.into_iter().collect()));
        }
        Ok((scheduled, retimed))
    }

    // ======================== Helpers ========================

    /// Location of a flight that may still be canceled or re-prioritized.
    fn check_mutable(&self, flight: FlightId, action: Action) -> Result<Location, Rejection> {
        let entry = self
            .registry
            .get(flight)
            .ok_or(Rejection::FlightNotFound { flight, action })?;
        if entry.location.state().has_departed() {
            return Err(Rejection::AlreadyDeparted { flight, action });
        }
        Ok(entry.location)
    }

    /// Removes an unsatisfied flight from every structure.
    fn withdraw(&mut self, flight: FlightId) -> Result<(), SchedulerError> {
        let entry = self
            .registry
            .get(flight)
            .copied()
            .ok_or(SchedulerError::RegistryDesync {
                flight,
                expected: FlightState::Pending,
            })?;

        let airline = match entry.location {
            Location::Queued(handle) => self.pending.take(handle)?.request.airline,
            Location::Scheduled(slot) => {
                if !self.timetable.remove(&slot) {
                    return Err(SchedulerError::MissingTimetableEntry { flight });
                }
                self.active
                    .remove(&flight)
                    .ok_or(SchedulerError::RegistryDesync {
                        flight,
                        expected: FlightState::Scheduled,
                    })?
                    .request
                    .airline
            }
            Location::InProgress(_) | Location::Completed => {
                return Err(SchedulerError::RegistryDesync {
                    flight,
                    expected: FlightState::Scheduled,
                })
            }
        };

        self.airlines.remove(airline, flight);
        self.registry.remove(flight);
        trace!("withdrew flight {flight} (airline {airline})");
        Ok(())
    }

    fn reject(&self, mut log: EventLog, rejection: Rejection) -> EventLog {
        debug!("rejected at t={}: {rejection}", self.now);
        log.push(Event::Rejected(rejection));
        log
    }
}
